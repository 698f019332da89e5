#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod store;

pub(crate) use http::{assert_content_type, assert_content_type_header, read_json};
pub(crate) use store::{MemoryTransactionStore, UnavailableTransactionStore};
