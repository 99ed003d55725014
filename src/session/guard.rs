use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::Error;
use crate::navigation::LoginRedirect;
use crate::telemetry::refresh::{RefreshOutcome, RefreshTelemetry};
use crate::types::RefreshResponse;

use super::{CredentialPair, SessionKey, SessionStore};

/// Convenience result alias for guard operations.
pub type SessionGuardResult<T> = Result<T, Error>;

/// The last renewal that ended the session, keyed by the token it was meant to replace.
struct FailedRenewal {
    rejected: String,
    cause: Arc<Error>,
}

/// Serialises access-token renewal for every request sharing one session.
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
    login_route: String,
    refresh_lock: Mutex<Option<FailedRenewal>>,
}

impl SessionGuard {
    pub fn new(
        store: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
        login_route: impl Into<String>,
    ) -> Self {
        Self {
            store,
            redirect,
            login_route: login_route.into(),
            refresh_lock: Mutex::new(None),
        }
    }

    /// Returns a usable access token after a request carrying `rejected` got a 401.
    ///
    /// Only one renewal runs at a time. A caller that waited on the lock while
    /// another one renewed picks up the stored token without calling
    /// `refresh_cb`; if that renewal failed instead, the caller gets the same
    /// cause and no second redirect fires. On any failure both credentials are
    /// cleared, the login redirect fires and `Error::SessionExpired` is returned.
    pub async fn renew<F, Fut>(
        &self,
        rejected: Option<&str>,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> SessionGuardResult<String>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = SessionGuardResult<RefreshResponse>>,
    {
        let mut last_failure = self.refresh_lock.lock().await;

        if let Some(current) = self.store.get(SessionKey::Access)
            && Some(current.as_str()) != rejected
        {
            debug!(attempt_id = %telemetry.attempt_id(), "access token already renewed");
            telemetry.emit_success(RefreshOutcome::Shared);
            return Ok(current);
        }

        if let Some(failed) = last_failure.as_ref()
            && Some(failed.rejected.as_str()) == rejected
        {
            debug!(attempt_id = %telemetry.attempt_id(), "session renewal already failed");
            return Err(Error::SessionExpired(Arc::clone(&failed.cause)));
        }

        let Some(refresh_token) = self.store.get(SessionKey::Refresh) else {
            let err = Error::Request("no refresh token stored".to_string());
            telemetry.emit_failure(&err);
            return Err(self.expire(&mut last_failure, rejected, err));
        };

        telemetry.emit_start();
        match refresh_cb(refresh_token.clone()).await {
            Ok(renewed) => {
                let pair = CredentialPair {
                    access_token: renewed.access,
                    refresh_token: renewed.refresh.or(Some(refresh_token)),
                };
                if let Err(err) = self.store.save(&pair) {
                    telemetry.emit_failure(&err);
                    return Err(self.expire(&mut last_failure, rejected, err));
                }
                *last_failure = None;
                telemetry.emit_success(RefreshOutcome::Renewed);
                Ok(pair.access_token)
            }
            Err(err) => {
                telemetry.emit_failure(&err);
                Err(self.expire(&mut last_failure, rejected, err))
            }
        }
    }

    fn expire(
        &self,
        last_failure: &mut Option<FailedRenewal>,
        rejected: Option<&str>,
        cause: Error,
    ) -> Error {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear session store");
        }
        self.redirect.redirect(&self.login_route);
        let cause = Arc::new(cause);
        *last_failure = rejected.map(|token| FailedRenewal {
            rejected: token.to_string(),
            cause: Arc::clone(&cause),
        });
        Error::SessionExpired(cause)
    }
}
