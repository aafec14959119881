//! Inquiry email composition.

use chrono::{DateTime, Utc};
use relay_core::InquirySubmission;
use uuid::Uuid;

use crate::config::MailRoute;

/// A composed message, ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    /// Replies go straight to the inquirer.
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Request context stamped into the email footer.
#[derive(Debug, Clone)]
pub struct InquiryEnvelope {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub client_id: String,
}

impl InquiryEnvelope {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            client_id: client_id.into(),
        }
    }
}

/// Composes the inquiry notification for the studio inbox.
pub fn inquiry_email(
    submission: &InquirySubmission,
    envelope: &InquiryEnvelope,
    route: &MailRoute,
) -> OutboundEmail {
    let service = submission.service();
    let description = escape_html(submission.description()).replace('\n', "<br>");

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #0d9488;">New Project Inquiry</h2>

  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #334155; margin-top: 0;">Contact Information</h3>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Phone:</strong> {phone}</p>
    <p><strong>Service Requested:</strong> {service_label} ({service})</p>
  </div>

  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #334155; margin-top: 0;">Project Description</h3>
    <p style="line-height: 1.6;">{description}</p>
  </div>

  <div style="background: #e2e8f0; padding: 15px; border-radius: 8px; margin: 20px 0;">
    <p style="margin: 0; font-size: 12px; color: #64748b;">
      <strong>Submitted:</strong> {submitted}<br>
      <strong>IP Address:</strong> {client}<br>
      <strong>Reference:</strong> {reference}
    </p>
  </div>
</div>
"#,
        name = escape_html(submission.name()),
        email = escape_html(submission.email()),
        phone = escape_html(submission.phone()),
        service_label = service.label(),
        service = service.as_str(),
        description = description,
        submitted = envelope.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        client = escape_html(&envelope.client_id),
        reference = envelope.reference,
    );

    OutboundEmail {
        from: route.from.clone(),
        to: route.to.clone(),
        reply_to: Some(submission.email().to_string()),
        subject: format!("New Project Inquiry from {}", submission.name()),
        html,
    }
}

/// Escapes text for inclusion in HTML element content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
