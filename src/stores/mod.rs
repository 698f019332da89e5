//! Contains the trait and implementations for objects that store [transactions](crate::Transaction).

mod transaction;

pub mod sqlite;

pub use sqlite::{SQLiteTransactionStore, create_app_state, create_transaction_table};
pub use transaction::TransactionStore;
