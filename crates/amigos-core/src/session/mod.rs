//! Wallet session domain module.
//!
//! - `model`: `Session` state and `ConnectionState`
//!
//! The session context that drives these state transitions lives in the
//! application crate (`WalletSession`).

mod model;

pub use model::{ConnectionState, Session};
