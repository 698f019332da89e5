//! A web service for recording monetary transactions that may reference a
//! parent transaction.
//!
//! Clients create transactions with an externally supplied ID, list the IDs
//! of transactions by their type and ask for the transitive sum of a
//! transaction: the total amount of every transaction that descends from it
//! through parent links.
//!
//! This library provides a JSON REST API backed by SQLite.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod json_error;
mod logging;
mod not_found;
mod routing;
mod stores;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::{MAX_TRANSACTION_ID, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{SQLiteTransactionStore, TransactionStore, create_app_state};
pub use transaction::{Transaction, TransactionBuilder, create_transaction, transitive_sum};

use crate::json_error::JsonError;

/// How long in-flight requests are given to finish once a shutdown signal arrives.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction ID in the URL path is not an unsigned integer.
    #[error("invalid transaction ID \"{0}\"")]
    InvalidTransactionId(String),

    /// The request body could not be decoded as a JSON object.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not decode request body: {0}")]
    InvalidRequestBody(String),

    /// A required field is missing from the request body.
    #[error("field '{0}' is missing")]
    MissingField(&'static str),

    /// A field in the request body has the wrong type.
    #[error("field '{0}' has the wrong type")]
    InvalidField(&'static str),

    /// A text field in the request body is empty or only contains whitespace.
    #[error("field '{0}' must not be blank")]
    BlankField(&'static str),

    /// The parent ID used to create a transaction did not match an existing
    /// transaction.
    ///
    /// Parents must be created before their children.
    #[error("parent transaction {0} does not exist")]
    ParentNotFound(TransactionId),

    /// A transaction with the same ID already exists in the database.
    ///
    /// Transactions are never overwritten, the existing transaction is left
    /// untouched.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateId(TransactionId),

    /// The requested transaction does not exist.
    #[error("transaction {0} does not exist")]
    TransactionNotFound(TransactionId),

    /// The parent links reachable from a transaction form a cycle.
    ///
    /// Parents must exist before their children, so this only happens when
    /// the stored data has been corrupted.
    #[error("the descendants of transaction {0} form a cycle")]
    GraphIntegrity(TransactionId),

    /// The transitive sum of the transaction is too large to be represented
    /// as a finite number.
    #[error("the transitive sum of transaction {0} is not a finite number")]
    SumOverflow(TransactionId),

    /// An unhandled/unexpected SQL error.
    ///
    /// The error should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// Whether the client can fix the error by changing its request.
    ///
    /// Bad input never mutates the store. Everything else is either a store
    /// failure or a data integrity violation.
    pub fn is_bad_input(&self) -> bool {
        match self {
            Error::InvalidTransactionId(_)
            | Error::InvalidRequestBody(_)
            | Error::MissingField(_)
            | Error::InvalidField(_)
            | Error::BlankField(_)
            | Error::ParentNotFound(_)
            | Error::DuplicateId(_)
            | Error::TransactionNotFound(_) => true,
            Error::GraphIntegrity(_)
            | Error::SumOverflow(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => false,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_bad_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let json_error = match self {
            Error::InvalidTransactionId(_) => JsonError::new(status, "Invalid transaction ID format"),
            Error::InvalidRequestBody(_) => JsonError::new(status, "Error decoding request body"),
            Error::MissingField(field) => {
                JsonError::new(status, format!("Field '{field}' is missing"))
            }
            Error::InvalidField(field) => JsonError::new(status, format!("Invalid {field} format")),
            Error::BlankField(field) => {
                JsonError::new(status, format!("Field '{field}' must not be blank"))
            }
            Error::ParentNotFound(_) => JsonError::new(status, "Parent transaction does not exist"),
            Error::DuplicateId(_) => {
                JsonError::new(status, "transaction with the same ID already exists")
            }
            Error::TransactionNotFound(_) => JsonError::new(
                status,
                "Transaction does not exist for given transaction ID",
            ),
            Error::GraphIntegrity(id) => {
                tracing::error!("The descendants of transaction {id} form a cycle");
                JsonError::new(status, "Transaction graph is corrupted")
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                JsonError::internal_server_error()
            }
        };

        json_error.into_response()
    }
}
