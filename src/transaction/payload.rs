//! Validates the JSON body of a create transaction request.

use serde_json::{Map, Value};

use crate::{
    Error, Transaction,
    database_id::{MAX_TRANSACTION_ID, TransactionId},
};

const AMOUNT: &str = "amount";
const TYPE: &str = "type";
const PARENT_ID: &str = "parent_id";

/// Build the transaction `id` from the fields of a request `body`.
///
/// Checks run in a fixed order and the first failure is returned: required
/// fields are present, then each field has the right type, then `type` is not
/// blank. A `parent_id` of `null` is treated the same as a missing one.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if `amount` or `type` is missing,
/// - [Error::InvalidField] if a field has the wrong type,
/// - or [Error::BlankField] if `type` is empty or only whitespace.
pub fn parse_transaction(
    id: TransactionId,
    body: &Map<String, Value>,
) -> Result<Transaction, Error> {
    let amount = body.get(AMOUNT).ok_or(Error::MissingField(AMOUNT))?;
    let transaction_type = body.get(TYPE).ok_or(Error::MissingField(TYPE))?;

    let amount = amount.as_f64().ok_or(Error::InvalidField(AMOUNT))?;
    let transaction_type = transaction_type
        .as_str()
        .ok_or(Error::InvalidField(TYPE))?;

    if transaction_type.trim().is_empty() {
        return Err(Error::BlankField(TYPE));
    }

    let parent_id = match body.get(PARENT_ID) {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_u64()
                .filter(|parent_id| *parent_id <= MAX_TRANSACTION_ID)
                .ok_or(Error::InvalidField(PARENT_ID))?,
        ),
    };

    Ok(Transaction::build(id, amount, transaction_type)
        .parent_id(parent_id)
        .finalize())
}
