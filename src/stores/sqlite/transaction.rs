//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, ffi, types::Type};

use crate::{Error, Transaction, database_id::TransactionId, stores::TransactionStore};

/// Stores transactions in a SQLite database.
///
/// The table must exist before the store is used, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Insert a new transaction into the database.
    ///
    /// Uniqueness is enforced by the primary key, so two concurrent inserts
    /// with the same ID cannot both succeed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateId] if a transaction with the same ID already exists,
    /// - [Error::ParentNotFound] if the parent ID fails the foreign key constraint,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn insert(&self, transaction: &Transaction) -> Result<(), Error> {
        let id = to_sql_id(transaction.id)?;
        let parent_id = transaction.parent_id.map(to_sql_id).transpose()?;

        self.connection()?
            .execute(
                "INSERT INTO \"transaction\" (id, amount, type, parent_id)
                 VALUES (?1, ?2, ?3, ?4)",
                (
                    id,
                    transaction.amount,
                    &transaction.transaction_type,
                    parent_id,
                ),
            )
            .map_err(|error| match (error, transaction.parent_id) {
                (
                    rusqlite::Error::SqliteFailure(
                        ffi::Error {
                            code: _,
                            extended_code:
                                ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE,
                        },
                        _,
                    ),
                    _,
                ) => Error::DuplicateId(transaction.id),
                (
                    rusqlite::Error::SqliteFailure(
                        ffi::Error {
                            code: _,
                            extended_code: ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                        },
                        _,
                    ),
                    Some(parent_id),
                ) => Error::ParentNotFound(parent_id),
                (error, _) => error.into(),
            })?;

        Ok(())
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let id = to_sql_id(id)?;
        let transaction = self
            .connection()?
            .prepare("SELECT id, amount, type, parent_id FROM \"transaction\" WHERE id = :id")?
            .query_row(&[(":id", &id)], map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    /// Retrieve the IDs of transactions with the type `transaction_type` in
    /// ascending order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn get_ids_by_type(&self, transaction_type: &str) -> Result<Vec<TransactionId>, Error> {
        self.connection()?
            .prepare("SELECT id FROM \"transaction\" WHERE type = :type ORDER BY id ASC")?
            .query_map(&[(":type", &transaction_type)], |row| {
                from_sql_id(0, row.get(0)?)
            })?
            .map(|maybe_id| maybe_id.map_err(|error| error.into()))
            .collect()
    }

    /// Retrieve the direct children of the transaction `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn get_children(&self, id: TransactionId) -> Result<Vec<Transaction>, Error> {
        let id = to_sql_id(id)?;

        self.connection()?
            .prepare(
                "SELECT id, amount, type, parent_id FROM \"transaction\"
                 WHERE parent_id = :id ORDER BY id ASC",
            )?
            .query_map(&[(":id", &id)], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Sum the descendants of `root` with a single recursive query.
    ///
    /// The query also checks whether `root` is its own parent or the child of
    /// one of its descendants.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::GraphIntegrity] if the descendants of `root` link back to it,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn sum_descendants(&self, root: TransactionId) -> Result<f64, Error> {
        let sql_root = to_sql_id(root)?;

        // UNION (not UNION ALL) discards rows that were already produced, so
        // the recursion stops even if the parent links contain a cycle.
        let (sum, has_cycle): (f64, bool) = self
            .connection()?
            .prepare(
                "WITH RECURSIVE descendant(id, amount) AS (
                    SELECT id, amount FROM \"transaction\"
                    WHERE parent_id = :root AND id != :root
                    UNION
                    SELECT child.id, child.amount FROM \"transaction\" child
                    JOIN descendant ON child.parent_id = descendant.id
                    WHERE child.id != :root
                )
                SELECT
                    COALESCE((SELECT SUM(amount) FROM descendant), 0.0),
                    EXISTS (
                        SELECT 1 FROM \"transaction\"
                        WHERE id = :root
                        AND (parent_id = :root OR parent_id IN (SELECT id FROM descendant))
                    )",
            )?
            .query_row(&[(":root", &sql_root)], |row| Ok((row.get(0)?, row.get(1)?)))?;

        if has_cycle {
            return Err(Error::GraphIntegrity(root));
        }

        Ok(sum)
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                type TEXT NOT NULL,
                parent_id INTEGER,
                FOREIGN KEY(parent_id) REFERENCES \"transaction\"(id)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_type ON \"transaction\"(type);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_parent_id ON \"transaction\"(parent_id);",
        (),
    )?;

    Ok(())
}

/// SQLite integers are signed, IDs above [crate::MAX_TRANSACTION_ID] do not fit.
fn to_sql_id(id: TransactionId) -> Result<i64, rusqlite::Error> {
    i64::try_from(id).map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
}

fn from_sql_id(column: usize, id: i64) -> Result<TransactionId, rusqlite::Error> {
    TransactionId::try_from(id)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(error)))
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = from_sql_id(0, row.get(0)?)?;
    let amount = row.get(1)?;
    let transaction_type = row.get(2)?;
    let parent_id = row
        .get::<_, Option<i64>>(3)?
        .map(|parent_id| from_sql_id(3, parent_id))
        .transpose()?;

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        parent_id,
    })
}
