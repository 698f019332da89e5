//! Defines the core data model for transactions.

use serde::Serialize;

use crate::database_id::TransactionId;

/// A monetary transaction, optionally linked to the transaction it derives from.
///
/// Transactions form a forest: each transaction has at most one parent and any
/// number of children. Children are not stored on the parent, they are found
/// by looking for transactions whose `parent_id` matches.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The client supplied ID of the transaction.
    pub id: TransactionId,
    /// The amount of money in this transaction.
    pub amount: f64,
    /// A free-form category label, e.g. "purchase" or "refund".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// The ID of the transaction this one derives from, if any.
    pub parent_id: Option<TransactionId>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: TransactionId, amount: f64, transaction_type: &str) -> TransactionBuilder {
        TransactionBuilder {
            id,
            amount,
            transaction_type: transaction_type.to_owned(),
            parent_id: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```
/// use transaction_service::Transaction;
///
/// let refund = Transaction::build(2, 50.0, "refund")
///     .parent_id(Some(1))
///     .finalize();
///
/// assert_eq!(refund.parent_id, Some(1));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The client supplied ID, unique across all transactions.
    pub id: TransactionId,

    /// The monetary amount of the transaction.
    ///
    /// No sign or precision rules are applied.
    pub amount: f64,

    /// The category label of the transaction.
    pub transaction_type: String,

    /// The ID of the parent transaction.
    ///
    /// When set, the parent must already exist at the time the transaction
    /// is created.
    pub parent_id: Option<TransactionId>,
}

impl TransactionBuilder {
    /// Set the parent ID for the transaction.
    pub fn parent_id(mut self, parent_id: Option<TransactionId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Build the [Transaction].
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: self.id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            parent_id: self.parent_id,
        }
    }
}
