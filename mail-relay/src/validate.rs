//! Structural checks run before any provider is contacted.

use validator::ValidateEmail;

use crate::request::SendRequest;
use crate::result::SendResult;

pub const MAX_SUBJECT_LENGTH: usize = 1000;
pub const MAX_CONTENT_LENGTH: usize = 10000;

/// Check a request and return an error result for the first violated rule.
///
/// Rules are checked in order: recipient address, sender address, subject,
/// content. Returns `None` when the request can be sent.
pub fn validate(req: &SendRequest) -> Option<SendResult> {
    if !req.to_email.validate_email() {
        return Some(SendResult::error("invalid recipient email"));
    }
    if !req.from_email.validate_email() {
        return Some(SendResult::error("invalid sender email"));
    }

    if req.subject.is_empty() {
        return Some(SendResult::error("subject cannot be empty"));
    }
    if req.subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Some(SendResult::error(format!(
            "subject cannot be more than {} characters",
            MAX_SUBJECT_LENGTH
        )));
    }

    if req.content.is_empty() {
        return Some(SendResult::error("content cannot be empty"));
    }
    if req.content.chars().count() > MAX_CONTENT_LENGTH {
        return Some(SendResult::error(format!(
            "content cannot be more than {} characters",
            MAX_CONTENT_LENGTH
        )));
    }

    None
}
