//! Application layer for AMIGOS DE TRON.
//!
//! Coordinates the domain types in `amigos-core` with whatever chain client
//! and wallet the host injects:
//!
//! - [`ContractAdapter`]: typed calls against the Amigos contract
//! - [`WalletSession`]: connection state machine and cached snapshots
//! - [`ActionOutcome`]: the user-facing result of every session action

pub mod action;
pub mod contract_adapter;
pub mod in_flight;
pub mod wallet_session;

pub use action::{ActionOutcome, FailureKind};
pub use contract_adapter::{ContractAdapter, DividendClaim};
pub use in_flight::{InFlightGuard, InFlightTracker, WriteOperation};
pub use wallet_session::WalletSession;
