//! The reminder batch itself.
//!
//! One invocation runs three steps in sequence:
//! 1. Select pending status records whose reminder time has elapsed
//! 2. Per record: resolve contact info, dispatch one reminder email
//! 3. Mark the record as reminded, only after the send succeeded
//!
//! Records are processed strictly one after another; a failure on one
//! record is logged and never aborts the rest of the batch.

use chrono::{DateTime, Utc};

use evalsys_common::error::AppError;
use evalsys_common::types::{EvaluationStatusRecord, RunReport};

use crate::mailer::Mailer;
use crate::message;
use crate::store::EvaluationStore;

/// Outcome of processing a single candidate.
enum ItemOutcome {
    Sent { recipient: String },
    SkippedNoEmail,
}

/// Single-shot batch over the given collaborators.
pub struct ReminderJob<'a, S: EvaluationStore, M: Mailer> {
    store: &'a S,
    mailer: &'a M,
    base_url: &'a str,
}

impl<'a, S: EvaluationStore, M: Mailer> ReminderJob<'a, S, M> {
    pub fn new(store: &'a S, mailer: &'a M, base_url: &'a str) -> Self {
        Self {
            store,
            mailer,
            base_url,
        }
    }

    /// Run one batch. Only a failure of the initial selection query is
    /// fatal; everything after that point is isolated per record.
    pub async fn run(&self, now: DateTime<Utc>) -> RunReport {
        let candidates = match self.store.due_candidates(now).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(error = %e, "Reminder candidate query failed");
                return RunReport::failed(e.to_string());
            }
        };

        let checked = candidates.len() as u32;
        tracing::info!(checked, "Found forms needing reminders");

        let mut sent = 0u32;

        for candidate in &candidates {
            match self.process(candidate, now).await {
                Ok(ItemOutcome::Sent { recipient }) => {
                    sent += 1;
                    tracing::info!(
                        document_id = %candidate.id,
                        recipient = %recipient,
                        "Reminder sent"
                    );
                }
                Ok(ItemOutcome::SkippedNoEmail) => {
                    tracing::warn!(
                        document_id = %candidate.id,
                        "No contact email on record, skipping"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        document_id = %candidate.id,
                        error = %e,
                        "Failed to process form"
                    );
                }
            }
        }

        RunReport::completed(checked, sent)
    }

    async fn process(
        &self,
        candidate: &EvaluationStatusRecord,
        now: DateTime<Utc>,
    ) -> Result<ItemOutcome, AppError> {
        let detail = self.store.detail(&candidate.id).await?;

        let Some(recipient) = message::recipient_email(&detail) else {
            return Ok(ItemOutcome::SkippedNoEmail);
        };

        let email = message::compose_reminder(self.base_url, &candidate.id, recipient, &detail);
        self.mailer.send(&email).await?;

        // Marking must follow a successful send; a failed send leaves the
        // record eligible for the next run.
        self.store.mark_reminded(&candidate.id, now).await?;

        Ok(ItemOutcome::Sent {
            recipient: recipient.to_string(),
        })
    }
}
