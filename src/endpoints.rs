//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactionservice/sum/{transaction_id}', use
//! [format_endpoint].

use std::fmt::Display;

/// The root route which greets the client.
pub const ROOT: &str = "/";
/// The route for checking whether the server is up.
pub const HEALTH_CHECK: &str = "/health-check";
/// The route to create a single transaction.
pub const TRANSACTION: &str = "/transactionservice/transaction/{transaction_id}";
/// The route to list the IDs of the transactions with a given type.
pub const TRANSACTIONS_BY_TYPE: &str = "/transactionservice/types/{type}";
/// The route to get the transitive sum of a transaction.
pub const TRANSITIVE_SUM: &str = "/transactionservice/sum/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactionservice/sum/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
