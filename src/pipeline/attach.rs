use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::Error;
use crate::session::{SessionKey, SessionStore};

use super::{ApiRequest, ApiResponse, Next, Stage};

/// Attaches the stored access token as a bearer header, if there is one.
pub struct CredentialAttachment {
    store: Arc<dyn SessionStore>,
}

impl CredentialAttachment {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Stage for CredentialAttachment {
    async fn handle(
        &self,
        mut request: ApiRequest,
        next: Next<'_>,
    ) -> Result<ApiResponse, Error> {
        if let Some(token) = self.store.get(SessionKey::Access)
            && let Err(err) = request.set_bearer(&token)
        {
            warn!(path = request.path(), error = %err, "sending request without credentials");
        }
        next.run(request).await
    }
}
