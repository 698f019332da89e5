use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use crate::{Error, Transaction, TransactionId, stores::TransactionStore};

/// Keeps transactions in memory and sums descendants with the provided
/// breadth-first walk.
///
/// Unlike SQLite, parent IDs are not checked on insert, which lets tests
/// build corrupted parent links.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryTransactionStore {
    transactions: Arc<Mutex<BTreeMap<TransactionId, Transaction>>>,
}

impl TransactionStore for MemoryTransactionStore {
    fn insert(&self, transaction: &Transaction) -> Result<(), Error> {
        let mut transactions = self.transactions.lock().unwrap();

        if transactions.contains_key(&transaction.id) {
            return Err(Error::DuplicateId(transaction.id));
        }

        transactions.insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        Ok(self.transactions.lock().unwrap().get(&id).cloned())
    }

    fn get_ids_by_type(&self, transaction_type: &str) -> Result<Vec<TransactionId>, Error> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .values()
            .filter(|transaction| transaction.transaction_type == transaction_type)
            .map(|transaction| transaction.id)
            .collect())
    }

    fn get_children(&self, id: TransactionId) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .values()
            .filter(|transaction| transaction.parent_id == Some(id))
            .cloned()
            .collect())
    }
}

/// A store whose every call fails as if the database were unreachable.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnavailableTransactionStore;

impl TransactionStore for UnavailableTransactionStore {
    fn insert(&self, _transaction: &Transaction) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _id: TransactionId) -> Result<Option<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_ids_by_type(&self, _transaction_type: &str) -> Result<Vec<TransactionId>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_children(&self, _id: TransactionId) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }
}
