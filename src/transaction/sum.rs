//! Computes the transitive sum of a transaction.

use crate::{Error, database_id::TransactionId, stores::TransactionStore};

/// Sum the amounts of every transaction that descends from `root`.
///
/// Descendants are found by following child links, i.e. transactions whose
/// parent is `root`, their children, and so on. The amount of `root` itself
/// is not included. Amounts are added as plain floating point numbers without
/// any rounding.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `root` does not exist,
/// - [Error::GraphIntegrity] if the stored parent links form a cycle,
/// - [Error::SumOverflow] if the sum is too large to represent,
/// - or the store's error if the store could not be read from.
pub fn transitive_sum<S>(root: TransactionId, store: &S) -> Result<f64, Error>
where
    S: TransactionStore,
{
    if store.get(root)?.is_none() {
        return Err(Error::TransactionNotFound(root));
    }

    let sum = store.sum_descendants(root)?;

    if !sum.is_finite() {
        return Err(Error::SumOverflow(root));
    }

    Ok(sum)
}
