//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    AppState, Error,
    database_id::parse_transaction_id,
    stores::TransactionStore,
    transaction::{create::create_transaction, payload::parse_transaction},
};

/// The body sent back after a transaction is created.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Always "ok".
    pub status: String,
}

/// A route handler for creating the transaction with the ID in the URL path.
///
/// Responds with 201 Created and `{"status": "ok"}` on success.
///
/// The body is decoded as JSON whatever its `Content-Type` header says.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), Error>
where
    S: TransactionStore,
{
    let id = parse_transaction_id(&transaction_id)
        .ok_or(Error::InvalidTransactionId(transaction_id))?;

    let body: Map<String, Value> = serde_json::from_slice(&body).map_err(|error| {
        tracing::debug!("Could not decode body for transaction {id}: {error}");
        Error::InvalidRequestBody(error.to_string())
    })?;

    let transaction = parse_transaction(id, &body)?;

    create_transaction(transaction, &state.transaction_store)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            status: "ok".to_owned(),
        }),
    ))
}
