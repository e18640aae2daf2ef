//! Minimal REST client for the Appwrite-compatible document store.
//!
//! Only the three operations this system consumes are implemented:
//! list-with-queries, get-by-id, and patch-fields-by-id.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use evalsys_common::error::AppError;

use crate::query::Filter;

/// One page of a collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<serde_json::Value>,
}

/// HTTP client for the document store, authenticated with project + API key
/// headers. Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct DocumentsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl DocumentsClient {
    /// Build a client for `endpoint`, sending the project id and API key on
    /// every request.
    pub fn new(endpoint: &str, project_id: &str, api_key: &str) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(project_id)
                .map_err(|_| AppError::Config("project id is not a valid header value".into()))?,
        );
        headers.insert(
            "X-Appwrite-Key",
            HeaderValue::from_str(api_key)
                .map_err(|_| AppError::Config("API key is not a valid header value".into()))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, database_id, collection_id
        )
    }

    /// List documents matching every filter in `filters`. Reads a single
    /// page; large result sets may be truncated by the store.
    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        filters: &[Filter],
    ) -> Result<DocumentList, AppError> {
        let url = self.documents_url(database_id, collection_id);
        let queries: Vec<(&str, String)> =
            filters.iter().map(|f| ("queries[]", f.to_wire())).collect();

        let response = self
            .http
            .get(&url)
            .query(&queries)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(message),
                _ => AppError::Store(message),
            });
        }

        let list: DocumentList = response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("invalid list response: {e}")))?;

        tracing::debug!(
            collection_id,
            total = list.total,
            returned = list.documents.len(),
            "Listed documents"
        );

        Ok(list)
    }

    /// Fetch a single document by id and deserialize it into `T`.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<T, AppError> {
        let url = format!(
            "{}/{}",
            self.documents_url(database_id, collection_id),
            document_id
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("get request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(match status {
                StatusCode::NOT_FOUND => AppError::NotFound(format!(
                    "document {document_id} not found in collection {collection_id}"
                )),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(message),
                _ => AppError::Store(message),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Malformed(format!("document {document_id}: {e}")))
    }

    /// Patch the given fields on a document, leaving all others untouched.
    pub async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &serde_json::Value,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/{}",
            self.documents_url(database_id, collection_id),
            document_id
        );

        let response = self
            .http
            .patch(&url)
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await
            .map_err(|e| AppError::Update(format!("update request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(message),
                _ => AppError::Update(message),
            });
        }

        Ok(())
    }
}

/// Extract the store's error message from a failed response, falling back
/// to the raw body when it is not the usual `{"message": ...}` shape.
async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body);
    format!("store returned {status}: {message}")
}
