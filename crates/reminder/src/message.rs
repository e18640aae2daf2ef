//! Reminder message composition.
//!
//! Every dynamic field in the template comes from the detail record through
//! the same ordered-fallback resolution: first non-empty source wins.

use evalsys_common::types::EvaluationDetailRecord;

use crate::mailer::OutboundEmail;

pub const REMINDER_SUBJECT: &str = "Reminder: Update Your Pending Evaluation Form";

/// First non-empty value from an ordered list of optional sources.
/// Whitespace-only strings count as empty.
pub fn first_non_empty<'a>(sources: &[Option<&'a str>]) -> Option<&'a str> {
    sources
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}

/// Recipient mailbox: primary email, then the contact-email fallback.
pub fn recipient_email(detail: &EvaluationDetailRecord) -> Option<&str> {
    first_non_empty(&[detail.email.as_deref(), detail.contact_email.as_deref()])
}

/// Display name for the greeting, defaulting to a generic placeholder.
pub fn display_name(detail: &EvaluationDetailRecord) -> &str {
    first_non_empty(&[detail.user_name.as_deref(), detail.customer_name.as_deref()])
        .unwrap_or("User")
}

/// Compose the plain-text reminder for one pending evaluation.
pub fn compose_reminder(
    base_url: &str,
    document_id: &str,
    recipient: &str,
    detail: &EvaluationDetailRecord,
) -> OutboundEmail {
    let name = display_name(detail);
    let project = first_non_empty(&[
        detail.project_name.as_deref(),
        detail.product_type.as_deref(),
    ])
    .unwrap_or("N/A");
    let customer = first_non_empty(&[detail.customer_name.as_deref()]).unwrap_or("N/A");
    let form_url = format!(
        "{}/posteval.html?id={}",
        base_url.trim_end_matches('/'),
        document_id
    );

    let body = format!(
        "Hello {name},\n\
         \n\
         This is an automated reminder that your evaluation form for {project} ({customer}) is still pending in the Evaluation System.\n\
         \n\
         Please update the form as soon as possible by clicking the link below:\n\
         {form_url}\n\
         \n\
         There is no need to reply to this email, as it has been automatically generated.\n\
         \n\
         Thank you for your attention.\n\
         \n\
         Evaluation System Team\n"
    );

    OutboundEmail {
        to: recipient.to_string(),
        subject: REMINDER_SUBJECT.to_string(),
        body,
    }
}
