//! Defines the transaction store trait.

use std::collections::{HashSet, VecDeque};

use crate::{Error, Transaction, database_id::TransactionId};

/// Handles the creation and retrieval of transactions.
///
/// Implementations are shared between concurrent requests, so every method
/// takes `&self` and any synchronisation is the store's responsibility.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Insert `transaction` into the store if no transaction with the same ID exists.
    ///
    /// The check for an existing ID and the write must happen atomically.
    ///
    /// # Errors
    /// Implementers should return a:
    /// - [Error::DuplicateId] if a transaction with the same ID already exists,
    /// - or [Error::ParentNotFound] if the store itself rejects the parent ID.
    fn insert(&self, transaction: &Transaction) -> Result<(), Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Returns `Ok(None)` if there is no transaction with the ID `id`.
    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Retrieve the IDs of the transactions with the type `transaction_type`.
    fn get_ids_by_type(&self, transaction_type: &str) -> Result<Vec<TransactionId>, Error>;

    /// Retrieve the transactions whose parent is `id`.
    fn get_children(&self, id: TransactionId) -> Result<Vec<Transaction>, Error>;

    /// Sum the amounts of every transaction that descends from `root`.
    ///
    /// `root` itself is not included, so a transaction without children sums
    /// to zero.
    ///
    /// The provided implementation walks the children breadth-first with one
    /// [TransactionStore::get_children] call per transaction. Stores that can
    /// do the whole walk in a single query should override it.
    ///
    /// # Errors
    /// Returns an [Error::GraphIntegrity] if a transaction is reached twice,
    /// which means the parent links contain a cycle.
    fn sum_descendants(&self, root: TransactionId) -> Result<f64, Error> {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        let mut sum = 0.0;

        while let Some(id) = queue.pop_front() {
            for child in self.get_children(id)? {
                if !visited.insert(child.id) {
                    return Err(Error::GraphIntegrity(root));
                }

                sum += child.amount;
                queue.push_back(child.id);
            }
        }

        Ok(sum)
    }
}
