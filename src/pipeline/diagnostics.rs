use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::errors::Error;

use super::{ApiRequest, ApiResponse, Next, Stage};

/// Logs each exchange that reaches the dispatcher, including the login and
/// refresh calls. Headers and bodies are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Diagnostics;

#[async_trait]
impl Stage for Diagnostics {
    async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse, Error> {
        let method = request.method().clone();
        let path = request.path().to_string();
        debug!(
            method = %method,
            path = %path,
            retry = request.is_retry(),
            authenticated = request.bearer().is_some(),
            "request.send"
        );
        let start = Instant::now();
        let result = next.run(request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(resp) => debug!(
                method = %method,
                path = %path,
                status = resp.status.as_u16(),
                elapsed_ms,
                "response.ok"
            ),
            Err(err) => warn!(
                method = %method,
                path = %path,
                kind = ?err.kind(),
                status = err.status().map(|s| s.as_u16()),
                elapsed_ms,
                error = %err,
                "response.error"
            ),
        }
        result
    }
}
