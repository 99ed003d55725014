use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::Error;
use crate::pipeline::{ApiRequest, ApiResponse, Next};
use crate::services::{
    AdminService, AnalyticsService, BookingService, GymService, NotificationService,
    PaymentService, SubscriptionService, UserService,
};
use crate::session::{CredentialPair, SessionKey, SessionStore};
use crate::types::{Credentials, TokenPair};

use super::{ApiClient, ApiClientBuilder};

pub const TOKEN_PATH: &str = "/users/token/";

impl ApiClient {
    /// Create a client with an in-memory session and the default login redirect.
    ///
    /// # ENV Vars (when using `Config::from_env`)
    /// * `GYM_API_URL` - Backend base address
    /// * `GYM_API_PREFIX` - Versioned prefix, `/api/v1` by default
    pub fn new(config: Config) -> Result<Self, Error> {
        ApiClientBuilder::new(config).build()
    }

    pub fn builder(config: Config) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn session(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.inner.store)
    }

    /// Runs `request` through the full pipeline.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        Next::new(&self.inner.stages, &self.inner.dispatcher)
            .run(request)
            .await
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Exchanges credentials for a token pair and stores it.
    ///
    /// Goes over the [`AuthRoute`](crate::pipeline::AuthRoute): a stale stored
    /// token must not be attached, and a 401 here means bad credentials, not an
    /// expired session.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, Error> {
        let request = ApiRequest::post(TOKEN_PATH).json(credentials)?;
        let pair: TokenPair = match self.inner.auth.send(request).await {
            Ok(resp) => resp.into_json()?,
            Err(err) => {
                warn!(username = %credentials.username, error = %err, "session.login failed");
                return Err(err);
            }
        };
        self.inner.store.save(&CredentialPair {
            access_token: pair.access.clone(),
            refresh_token: pair.refresh.clone(),
        })?;
        info!(
            username = %credentials.username,
            has_refresh = pair.refresh.is_some(),
            "session.login"
        );
        Ok(pair)
    }

    pub fn logout(&self) -> Result<(), Error> {
        self.inner.store.clear()?;
        info!("session.logout");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.store.get(SessionKey::Access).is_some()
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn gyms(&self) -> GymService<'_> {
        GymService::new(self)
    }

    pub fn bookings(&self) -> BookingService<'_> {
        BookingService::new(self)
    }

    pub fn subscriptions(&self) -> SubscriptionService<'_> {
        SubscriptionService::new(self)
    }

    pub fn payments(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    pub fn analytics(&self) -> AnalyticsService<'_> {
        AnalyticsService::new(self)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(self)
    }

    pub fn admin(&self) -> AdminService<'_> {
        AdminService::new(self)
    }
}
