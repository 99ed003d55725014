use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::Error;
use crate::session::SessionGuard;
use crate::telemetry::refresh::RefreshTelemetry;
use crate::types::{RefreshRequest, RefreshResponse};

use super::{ApiRequest, ApiResponse, AuthRoute, Next, Stage};

pub const REFRESH_PATH: &str = "/users/token/refresh/";

/// Renews the session once when a request is rejected with 401, then replays it.
///
/// A 401 on a request that already carries the retry marker is returned to
/// the caller untouched. The refresh call goes over the [`AuthRoute`] so it
/// never re-enters this stage.
pub struct RefreshAndRetry {
    guard: Arc<SessionGuard>,
    auth: AuthRoute,
}

impl RefreshAndRetry {
    pub fn new(guard: Arc<SessionGuard>, auth: AuthRoute) -> Self {
        Self { guard, auth }
    }

    async fn exchange(&self, refresh_token: String) -> Result<RefreshResponse, Error> {
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh: &refresh_token,
        })?;
        let resp = self.auth.send(request).await?;
        resp.into_json()
    }
}

#[async_trait]
impl Stage for RefreshAndRetry {
    async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse, Error> {
        if request.is_retry() {
            return next.run(request).await;
        }
        let replay = request.clone();
        match next.run(request).await {
            Err(err) if err.is_unauthorized() => {
                warn!(
                    status = 401,
                    method = %replay.method(),
                    path = replay.path(),
                    "unauthorized response; renewing session"
                );
                let telemetry = RefreshTelemetry::new(replay.method(), replay.path());
                let access = self
                    .guard
                    .renew(replay.bearer(), |refresh| self.exchange(refresh), &telemetry)
                    .await?;

                let mut retry = replay.mark_retried();
                retry.set_bearer(&access)?;
                info!(
                    attempt_id = %telemetry.attempt_id(),
                    path = retry.path(),
                    "replaying request with renewed session"
                );
                next.run(retry).await
            }
            other => other,
        }
    }
}
