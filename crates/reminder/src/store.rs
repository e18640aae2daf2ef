//! Store operations the reminder job consumes, and their production
//! adapter over the document-store REST client.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use evalsys_common::config::AppConfig;
use evalsys_common::error::AppError;
use evalsys_common::types::{EvaluationDetailRecord, EvaluationStatusRecord};
use evalsys_store::{DocumentsClient, Filter};

/// The three document-store operations this job performs.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// Every pending status record whose reminder time has elapsed at `now`
    /// and that has not been notified yet. Result order is unspecified.
    async fn due_candidates(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EvaluationStatusRecord>, AppError>;

    /// The detail record sharing `id` with a status record.
    async fn detail(&self, id: &str) -> Result<EvaluationDetailRecord, AppError>;

    /// Persist the reminder bookkeeping on a status record: sent flag plus
    /// timestamp, nothing else.
    async fn mark_reminded(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError>;
}

/// `EvaluationStore` backed by the Appwrite-compatible document store.
pub struct AppwriteEvaluationStore {
    client: DocumentsClient,
    database_id: String,
    status_collection_id: String,
    detail_collection_id: String,
}

impl AppwriteEvaluationStore {
    pub fn new(client: DocumentsClient, config: &AppConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            status_collection_id: config.status_collection_id.clone(),
            detail_collection_id: config.detail_collection_id.clone(),
        }
    }
}

#[async_trait]
impl EvaluationStore for AppwriteEvaluationStore {
    async fn due_candidates(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EvaluationStatusRecord>, AppError> {
        let filters = [
            Filter::equal("result", "pending"),
            Filter::less_than_equal("reminderDate", wire_timestamp(now)),
            Filter::equal("reminderSent", false),
        ];

        let list = self
            .client
            .list_documents(&self.database_id, &self.status_collection_id, &filters)
            .await?;

        Ok(collect_candidates(list.documents))
    }

    async fn detail(&self, id: &str) -> Result<EvaluationDetailRecord, AppError> {
        self.client
            .get_document(&self.database_id, &self.detail_collection_id, id)
            .await
    }

    async fn mark_reminded(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        self.client
            .update_document(
                &self.database_id,
                &self.status_collection_id,
                id,
                &reminder_patch(at),
            )
            .await
    }
}

/// Convert raw listed documents into typed candidates. A document that
/// fails typed deserialization is logged with its id and dropped rather
/// than coerced or aborting the batch; it stays unmarked and will surface
/// again on every run until the data is repaired.
fn collect_candidates(documents: Vec<serde_json::Value>) -> Vec<EvaluationStatusRecord> {
    let mut candidates = Vec::with_capacity(documents.len());
    for doc in documents {
        let id = doc
            .get("$id")
            .and_then(|v| v.as_str())
            .unwrap_or("<missing $id>")
            .to_string();
        match serde_json::from_value::<EvaluationStatusRecord>(doc) {
            Ok(record) => candidates.push(record),
            Err(e) => {
                tracing::error!(document_id = %id, error = %e, "Skipping malformed status document");
            }
        }
    }
    candidates
}

/// The exact two-field patch the marker writes.
fn reminder_patch(at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "reminderSent": true,
        "reminderSentDate": wire_timestamp(at),
    })
}

/// ISO 8601 with milliseconds and a `Z` suffix, the format the store keeps
/// its datetime attributes in.
fn wire_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
