use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::Error;
use crate::navigation::{LoginRedirect, TracingRedirect};
use crate::pipeline::{
    AuthRoute, CredentialAttachment, Diagnostics, Dispatcher, RefreshAndRetry, Stage,
};
use crate::session::{InMemorySessionStore, SessionGuard, SessionStore};

use super::{ApiClient, ClientInner};

pub struct ApiClientBuilder {
    config: Config,
    store: Option<Arc<dyn SessionStore>>,
    redirect: Option<Arc<dyn LoginRedirect>>,
    stages: Vec<Arc<dyn Stage>>,
}

impl ApiClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: None,
            redirect: None,
            stages: Vec::new(),
        }
    }

    /// Defaults to an [`InMemorySessionStore`].
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Defaults to [`TracingRedirect`].
    pub fn login_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Adds a caller stage. Caller stages run in insertion order, before the
    /// built-in credential, refresh and diagnostics stages.
    pub fn stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Validates the configuration and assembles the pipeline. No network
    /// call is made.
    pub fn build(self) -> Result<ApiClient, Error> {
        let dispatcher = Dispatcher::new(&self.config)?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let redirect = self.redirect.unwrap_or_else(|| Arc::new(TracingRedirect));
        let guard = Arc::new(SessionGuard::new(
            Arc::clone(&store),
            redirect,
            self.config.login_route.clone(),
        ));

        let diagnostics: Option<Arc<dyn Stage>> = self
            .config
            .log_traffic
            .then(|| Arc::new(Diagnostics) as Arc<dyn Stage>);
        let auth = AuthRoute::new(diagnostics.iter().cloned().collect(), dispatcher.clone());

        let mut stages = self.stages;
        stages.push(Arc::new(CredentialAttachment::new(Arc::clone(&store))));
        stages.push(Arc::new(RefreshAndRetry::new(guard, auth.clone())));
        stages.extend(diagnostics);

        info!(
            api_root = dispatcher.api_root(),
            stages = stages.len(),
            "api client ready"
        );
        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                config: self.config,
                dispatcher,
                auth,
                stages,
                store,
            }),
        })
    }
}
