//! Outbound email request type.

use serde::Deserialize;

/// A single outbound email as submitted by a client.
///
/// Missing fields deserialize as empty strings so that the validator,
/// not the extractor, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendRequest {
    /// Sender email address
    #[serde(default)]
    pub from_email: String,
    /// Recipient email address (single recipient)
    #[serde(default)]
    pub to_email: String,
    /// Email subject
    #[serde(default)]
    pub subject: String,
    /// Plain text body
    #[serde(default)]
    pub content: String,
}

impl SendRequest {
    pub fn new(
        from_email: impl Into<String>,
        to_email: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            from_email: from_email.into(),
            to_email: to_email.into(),
            subject: subject.into(),
            content: content.into(),
        }
    }
}
