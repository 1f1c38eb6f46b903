//! saldo-domain
//!
//! Pure domain models (Journal, RecurringRule, TransactionInstance, forecast
//! types). No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod forecast;
pub mod journal;
pub mod rule;
pub mod transaction;

pub use common::*;
pub use forecast::*;
pub use journal::*;
pub use rule::*;
pub use transaction::*;
