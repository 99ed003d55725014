use jiff::{SignedDuration, Timestamp};
use reqwest::Method;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This attempt exchanged the refresh token for a new access token.
    Renewed,
    /// Another request renewed the session while this one waited.
    Shared,
}

/// Structured events for the session renewal triggered by one rejected request.
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    method: Method,
    path: String,
    started_at: Timestamp,
}

impl RefreshTelemetry {
    pub fn new(method: &Method, path: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            method: method.clone(),
            path: path.into(),
            started_at: Timestamp::now(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Time since the rejected request asked for a renewal, lock wait included.
    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.started_at)
    }

    pub fn emit_start(&self) {
        info!(
            attempt_id = %self.attempt_id,
            method = %self.method,
            path = %self.path,
            waited_ms = self.elapsed().as_millis() as i64,
            "refresh.start"
        );
    }

    pub fn emit_success(&self, outcome: RefreshOutcome) {
        info!(
            attempt_id = %self.attempt_id,
            method = %self.method,
            path = %self.path,
            outcome = ?outcome,
            elapsed_ms = self.elapsed().as_millis() as i64,
            "refresh.success"
        );
    }

    pub fn emit_failure(&self, err: &Error) {
        error!(
            attempt_id = %self.attempt_id,
            method = %self.method,
            path = %self.path,
            status = err.status().map(|s| s.as_u16()),
            elapsed_ms = self.elapsed().as_millis() as i64,
            error = %err,
            "refresh.failure"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_get_distinct_ids() {
        let telemetry = RefreshTelemetry::new(&Method::POST, "/bookings/");
        assert_eq!(telemetry.attempt_id(), telemetry.attempt_id());
        assert_ne!(
            telemetry.attempt_id(),
            RefreshTelemetry::new(&Method::POST, "/bookings/").attempt_id()
        );
        assert!(!telemetry.elapsed().is_negative());
    }
}
