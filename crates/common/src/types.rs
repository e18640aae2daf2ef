use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of an evaluation form, maintained by the external
/// evaluation workflow. Values this job does not know about deserialize
/// as `Other` rather than failing the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalResult {
    Pending,
    Completed,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for EvalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalResult::Pending => write!(f, "pending"),
            EvalResult::Completed => write!(f, "completed"),
            EvalResult::Other => write!(f, "other"),
        }
    }
}

/// Post-evaluation status document: completion state plus reminder
/// bookkeeping. Only `reminder_sent` / `reminder_sent_date` are ever
/// written by this job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStatusRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub result: EvalResult,
    pub reminder_date: Option<DateTime<Utc>>,
    /// Absent on documents created before reminder bookkeeping existed;
    /// absent means "not yet sent".
    #[serde(default)]
    pub reminder_sent: bool,
    pub reminder_sent_date: Option<DateTime<Utc>>,
}

/// Main evaluation document holding contact and display information,
/// keyed by the same identifier as its status counterpart. Every field
/// is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetailRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: Option<String>,
    pub contact_email: Option<String>,
    pub user_name: Option<String>,
    pub customer_name: Option<String>,
    pub project_name: Option<String>,
    pub product_type: Option<String>,
}

/// Structured result handed back to the invoking scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    pub fn completed(checked: u32, sent: u32) -> Self {
        Self {
            success: true,
            checked: Some(checked),
            sent: Some(sent),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            checked: None,
            sent: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_record_missing_reminder_sent_defaults_false() {
        let doc = serde_json::json!({
            "$id": "abc123",
            "result": "pending",
            "reminderDate": "2026-08-01T09:00:00Z"
        });
        let record: EvaluationStatusRecord = serde_json::from_value(doc).unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.result, EvalResult::Pending);
        assert!(!record.reminder_sent);
        assert!(record.reminder_sent_date.is_none());
    }

    #[test]
    fn test_status_record_unknown_result_maps_to_other() {
        let doc = serde_json::json!({
            "$id": "abc123",
            "result": "escalated",
            "reminderSent": true
        });
        let record: EvaluationStatusRecord = serde_json::from_value(doc).unwrap();
        assert_eq!(record.result, EvalResult::Other);
        assert!(record.reminder_sent);
    }

    #[test]
    fn test_detail_record_camel_case_fields() {
        let doc = serde_json::json!({
            "$id": "abc123",
            "contactEmail": "ops@example.com",
            "customerName": "Acme",
            "productType": "Widget"
        });
        let record: EvaluationDetailRecord = serde_json::from_value(doc).unwrap();
        assert!(record.email.is_none());
        assert_eq!(record.contact_email.as_deref(), Some("ops@example.com"));
        assert_eq!(record.customer_name.as_deref(), Some("Acme"));
        assert_eq!(record.product_type.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_run_report_completed_shape() {
        let report = RunReport::completed(3, 2);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "checked": 3, "sent": 2})
        );
    }

    #[test]
    fn test_run_report_failed_shape() {
        let report = RunReport::failed("query blew up");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "query blew up"})
        );
    }
}
