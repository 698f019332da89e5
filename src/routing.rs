//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, get_transactions_by_type_endpoint,
        get_transitive_sum_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore,
{
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HEALTH_CHECK, get(get_health_check))
        .route(
            endpoints::TRANSACTION,
            put(create_transaction_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_TYPE,
            get(get_transactions_by_type_endpoint::<S>),
        )
        .route(
            endpoints::TRANSITIVE_SUM,
            get(get_transitive_sum_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' greets the client.
async fn get_index_page() -> &'static str {
    "Welcome to transaction system"
}

/// Lets load balancers and humans check that the server is up.
async fn get_health_check() -> &'static str {
    "Hi, I am transaction system. I am healthy"
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router, create_app_state, endpoints,
        endpoints::format_endpoint,
        test_utils::{MemoryTransactionStore, assert_content_type_header},
    };

    fn get_test_server() -> TestServer {
        let state = create_app_state(rusqlite::Connection::open_in_memory().unwrap())
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_greets_client() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text("Welcome to transaction system");
    }

    #[tokio::test]
    async fn health_check_responds() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH_CHECK).await;

        response.assert_status_ok();
        response.assert_text_contains("healthy");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/transactionservice/nope").await;

        response.assert_status_not_found();
        assert_content_type_header(&response, "application/json");
        response.assert_json(&json!({
            "success": "false",
            "error": "Not found",
            "status": 404,
        }));
    }

    #[tokio::test]
    async fn create_route_only_accepts_put() {
        let server = get_test_server();

        let response = server
            .post(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&json!({"amount": 100.0, "type": "purchase"}))
            .await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn example_scenario() {
        let server = get_test_server();

        for (id, body) in [
            (1, json!({"amount": 100, "type": "purchase"})),
            (2, json!({"amount": 50, "type": "refund", "parent_id": 1})),
            (3, json!({"amount": 20, "type": "refund", "parent_id": 2})),
        ] {
            server
                .put(&format_endpoint(endpoints::TRANSACTION, id))
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
        }

        for (id, want) in [(1, 70.0_f64), (2, 20.0), (3, 0.0)] {
            let response = server
                .get(&format_endpoint(endpoints::TRANSITIVE_SUM, id))
                .await;

            response.assert_status_ok();
            assert_eq!(response.json::<Value>()["sum"], want, "sum of {id}");
        }

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTIONS_BY_TYPE, "refund"))
            .await;
        let mut ids: Vec<u64> =
            serde_json::from_value(response.json::<Value>()["transaction_ids"].clone()).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 3]);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&json!({"amount": 100, "type": "purchase"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "transaction with the same ID already exists"
        );
    }

    #[tokio::test]
    async fn router_works_with_walking_store() {
        let server = TestServer::try_new(build_router(AppState::new(
            MemoryTransactionStore::default(),
        )))
        .expect("Could not create test server.");

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 10))
            .json(&json!({"amount": 1.5, "type": "purchase"}))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .put(&format_endpoint(endpoints::TRANSACTION, 11))
            .json(&json!({"amount": 2.5, "type": "fee", "parent_id": 10}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get(&format_endpoint(endpoints::TRANSITIVE_SUM, 10))
            .await;

        response.assert_json(&json!({"sum": 2.5}));
    }
}
