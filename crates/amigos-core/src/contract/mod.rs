//! Contract domain module.
//!
//! # Module Structure
//!
//! - `method`: static ABI description of every contract function
//! - `invocation`: a concrete call (target, method, encoded arguments, value)
//! - `model`: read-only snapshots returned by view functions
//! - `client`: the `ChainClient` trait the adapter talks to
//! - `error`: `ContractCallError`

mod client;
mod error;
mod invocation;
pub mod method;
mod model;

pub use client::ChainClient;
pub use error::ContractCallError;
pub use invocation::{ContractInvocation, ReceiptStatus, TxId, TxReceipt};
pub use method::{ContractMethod, Mutability};
pub use model::{
    BURN_GOAL_RATIO, DividendInfo, GlobalStats, MatrixInfo, PlanTier, TOTAL_SUPPLY_TRX, UserInfo,
};
