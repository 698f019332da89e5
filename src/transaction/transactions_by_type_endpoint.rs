//! Defines the endpoint for listing transaction IDs by type.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, database_id::TransactionId, stores::TransactionStore};

/// The IDs of the transactions that have the requested type.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionIdsResponse {
    /// The matching IDs, in no particular order.
    pub transaction_ids: Vec<TransactionId>,
}

/// A route handler for getting the IDs of the transactions with the type in
/// the URL path.
///
/// A type that no transaction has results in an empty list.
pub async fn get_transactions_by_type_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_type): Path<String>,
) -> Result<Json<TransactionIdsResponse>, Error>
where
    S: TransactionStore,
{
    let transaction_ids = state.transaction_store.get_ids_by_type(&transaction_type)?;

    Ok(Json(TransactionIdsResponse { transaction_ids }))
}
