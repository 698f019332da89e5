//! Transaction management for the transaction service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Validation of new transactions and the transitive sum over their descendants
//! - Route handlers for the transaction endpoints

mod core;
mod create;
mod create_transaction_endpoint;
mod payload;
mod sum;
mod transactions_by_type_endpoint;
mod transitive_sum_endpoint;

pub use core::{Transaction, TransactionBuilder};
pub use create::create_transaction;
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use sum::transitive_sum;
pub use transactions_by_type_endpoint::get_transactions_by_type_endpoint;
pub use transitive_sum_endpoint::get_transitive_sum_endpoint;
