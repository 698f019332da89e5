//! Transaction ID type definition.

/// Alias for the integer type used for transaction IDs.
///
/// IDs are supplied by clients rather than generated by the database.
pub type TransactionId = u64;

/// The largest ID that fits in a SQLite `INTEGER` column.
pub const MAX_TRANSACTION_ID: TransactionId = i64::MAX as TransactionId;

/// Parse a transaction ID from a URL path segment.
///
/// Returns `None` if `text` is not made of ASCII digits only or is larger
/// than [MAX_TRANSACTION_ID]. A leading `+` is rejected.
pub fn parse_transaction_id(text: &str) -> Option<TransactionId> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    text.parse::<TransactionId>()
        .ok()
        .filter(|id| *id <= MAX_TRANSACTION_ID)
}
