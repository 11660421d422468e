//! Send orchestration: validation, primary provider, fallback.
//!
//! ```text
//! validate ──fail──────────────────────────────→ validation error
//!    │
//! primary ──success────────────────────────────→ primary result
//!    │
//! secondary ──success──────────────────────────→ secondary result
//!    ├──rejected───────────────────────────────→ primary result
//!    └──other──────────────────────────────────→ generic error
//! ```

use tracing::{debug, error, info, warn};

use crate::provider::EmailProvider;
use crate::request::SendRequest;
use crate::result::SendResult;
use crate::validate::validate;

/// Message returned when neither provider could send.
pub const UNAVAILABLE_MESSAGE: &str = "Sorry! We cannot send email for now. Please try later.";

/// Sends through a primary provider and falls back to a secondary one.
///
/// Holds no mutable state; a single instance can serve concurrent requests.
pub struct Dispatcher<P, S> {
    primary: P,
    secondary: S,
}

impl<P: EmailProvider, S: EmailProvider> Dispatcher<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Validate and send one email, returning exactly one result.
    pub async fn send_email(&self, req: &SendRequest) -> SendResult {
        if let Some(invalid) = validate(req) {
            info!(reason = %invalid.message(), "dispatch_validation_failed");
            return invalid;
        }

        let primary = self.primary.send(req).await;
        if primary.is_success() {
            debug!(
                provider = self.primary.name(),
                status = %primary.status(),
                message = %primary.message(),
                "dispatch_returning_primary"
            );
            return primary;
        }

        warn!(
            provider = self.primary.name(),
            status = %primary.status(),
            fallback = self.secondary.name(),
            "dispatch_primary_failed"
        );

        let secondary = self.secondary.send(req).await;
        if secondary.is_success() {
            debug!(
                provider = self.secondary.name(),
                status = %secondary.status(),
                message = %secondary.message(),
                "dispatch_returning_secondary"
            );
            return secondary;
        }

        // A recipient rejection is reported as the primary saw it.
        if secondary.is_rejected() {
            debug!(
                provider = self.primary.name(),
                status = %primary.status(),
                message = %primary.message(),
                "dispatch_returning_primary"
            );
            return primary;
        }

        error!(
            primary = self.primary.name(),
            primary_status = %primary.status(),
            primary_message = %primary.message(),
            secondary = self.secondary.name(),
            secondary_status = %secondary.status(),
            secondary_message = %secondary.message(),
            "dispatch_all_providers_failed"
        );

        SendResult::error(UNAVAILABLE_MESSAGE)
    }
}
