//! Defines the endpoint for the transitive sum of a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, database_id::parse_transaction_id, stores::TransactionStore,
    transaction::sum::transitive_sum,
};

/// The total amount of the descendants of a transaction.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SumResponse {
    /// The sum of the amounts, excluding the requested transaction itself.
    pub sum: f64,
}

/// A route handler for getting the transitive sum of the transaction with
/// the ID in the URL path.
///
/// An ID that does not refer to a transaction is a bad request rather than a
/// sum of zero.
pub async fn get_transitive_sum_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<SumResponse>, Error>
where
    S: TransactionStore,
{
    let id = parse_transaction_id(&transaction_id)
        .ok_or(Error::InvalidTransactionId(transaction_id))?;

    let sum = transitive_sum(id, &state.transaction_store)?;

    Ok(Json(SumResponse { sum }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::{
        SQLiteTransactionStore, Transaction, create_app_state, create_transaction, endpoints,
        endpoints::format_endpoint,
    };

    use super::{SumResponse, get_transitive_sum_endpoint};

    fn get_test_server() -> (TestServer, SQLiteTransactionStore) {
        let state = create_app_state(rusqlite::Connection::open_in_memory().unwrap())
            .expect("Could not create app state");
        let store = state.transaction_store.clone();
        let app = Router::new()
            .route(
                endpoints::TRANSITIVE_SUM,
                get(get_transitive_sum_endpoint::<SQLiteTransactionStore>),
            )
            .with_state(state);

        (
            TestServer::try_new(app).expect("Could not create test server."),
            store,
        )
    }

    #[tokio::test]
    async fn sums_descendants() {
        let (server, store) = get_test_server();
        create_transaction(Transaction::build(1, 100.0, "purchase").finalize(), &store).unwrap();
        create_transaction(
            Transaction::build(2, 50.0, "refund").parent_id(Some(1)).finalize(),
            &store,
        )
        .unwrap();

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 1))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<SumResponse>(), SumResponse { sum: 50.0 });
    }

    #[tokio::test]
    async fn leaf_sums_to_zero() {
        let (server, store) = get_test_server();
        create_transaction(Transaction::build(1, 100.0, "purchase").finalize(), &store).unwrap();

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 1))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<SumResponse>(), SumResponse { sum: 0.0 });
    }

    #[tokio::test]
    async fn unknown_id_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 42))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(
            body["error"],
            "Transaction does not exist for given transaction ID"
        );
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server.get("/transactionservice/sum/-1").await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Invalid transaction ID format"
        );
    }

    #[tokio::test]
    async fn overflowing_sum_is_a_server_error() {
        let (server, store) = get_test_server();
        create_transaction(Transaction::build(5, 1e308, "purchase").finalize(), &store).unwrap();
        for id in [6, 7] {
            create_transaction(
                Transaction::build(id, 1e308, "purchase")
                    .parent_id(Some(5))
                    .finalize(),
                &store,
            )
            .unwrap();
        }

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 5))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["status"], 500);
        assert!(body.get("sum").is_none());
    }

    #[tokio::test]
    async fn corrupted_graph_is_a_server_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        crate::initialize_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO \"transaction\" (id, amount, type, parent_id) VALUES (1, 1.0, 'loop', NULL)",
            (),
        )
        .unwrap();
        conn.execute("UPDATE \"transaction\" SET parent_id = 1 WHERE id = 1", ())
            .unwrap();
        let state = create_app_state(conn).expect("Could not create app state");
        let app = Router::new()
            .route(
                endpoints::TRANSITIVE_SUM,
                get(get_transitive_sum_endpoint::<SQLiteTransactionStore>),
            )
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 1))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>()["error"],
            "Transaction graph is corrupted"
        );
    }
}
