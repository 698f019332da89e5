//! Validates and stores new transactions.

use crate::{Error, Transaction, stores::TransactionStore};

/// Create `candidate` in `store`.
///
/// If `candidate` names a parent, the parent must already exist. The
/// transaction is then inserted with the store's atomic insert, which is what
/// guarantees that at most one create per ID ever succeeds.
///
/// Nothing is written when an error is returned.
///
/// # Errors
/// This function will return a:
/// - [Error::ParentNotFound] if the parent transaction does not exist,
/// - [Error::DuplicateId] if a transaction with the same ID already exists,
/// - or the store's error if the store could not be read from or written to.
pub fn create_transaction<S>(candidate: Transaction, store: &S) -> Result<(), Error>
where
    S: TransactionStore,
{
    if let Some(parent_id) = candidate.parent_id {
        if store.get(parent_id)?.is_none() {
            tracing::debug!(
                "Rejected transaction {}: parent {parent_id} does not exist",
                candidate.id
            );
            return Err(Error::ParentNotFound(parent_id));
        }
    }

    store.insert(&candidate).inspect_err(|error| {
        tracing::debug!("Could not insert transaction {}: {error}", candidate.id)
    })?;

    tracing::info!(
        "Created transaction {} of type {:?}",
        candidate.id,
        candidate.transaction_type
    );

    Ok(())
}
