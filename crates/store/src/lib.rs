pub mod client;
pub mod query;

pub use client::{DocumentList, DocumentsClient};
pub use query::Filter;
