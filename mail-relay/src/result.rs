//! Uniform send outcome shared by the validator, the providers and the
//! dispatcher.

use std::fmt;

use serde::{Serialize, Serializer};

/// Message returned for every successful delivery.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully!";

/// Status tag of a send outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Success,
    Error,
    /// The provider refused delivery to a specific recipient.
    Rejected,
    /// A status tag reported by a provider that we do not classify.
    Other(String),
}

impl SendStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SendStatus::Success => "success",
            SendStatus::Error => "error",
            SendStatus::Rejected => "rejected",
            SendStatus::Other(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SendStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of a send attempt.
///
/// The HTTP-style `code` is derived from the status: 200 for success,
/// 400 for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResult {
    status: SendStatus,
    message: String,
    code: u16,
}

impl SendResult {
    pub fn new(status: SendStatus, message: impl Into<String>) -> Self {
        let code = match status {
            SendStatus::Success => 200,
            _ => 400,
        };
        Self {
            status,
            message: message.into(),
            code,
        }
    }

    pub fn success() -> Self {
        Self::new(SendStatus::Success, SUCCESS_MESSAGE)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(SendStatus::Error, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(SendStatus::Rejected, message)
    }

    pub fn status(&self) -> &SendStatus {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.status == SendStatus::Success
    }

    pub fn is_rejected(&self) -> bool {
        self.status == SendStatus::Rejected
    }
}
