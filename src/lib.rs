//! Client gateway for the gym booking REST backend.
//!
//! Every call goes through one [`ApiClient`]: requests get the stored bearer
//! token attached, a 401 triggers a single session renewal and replay, and
//! all other failures are returned unchanged as [`Error`].

mod client;
mod config;
mod errors;
pub mod navigation;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod types;


pub use client::{ApiClient, ApiClientBuilder};
pub use config::{Config, ConfigLocation, DEFAULT_API_PREFIX, DEFAULT_LOGIN_ROUTE};
pub use errors::{Error, FailureKind};
pub use navigation::{LoginRedirect, TracingRedirect};
pub use pipeline::{ApiRequest, ApiResponse};
pub use session::{
    CredentialPair, FileSessionStore, InMemorySessionStore, SessionKey, SessionStore,
};
