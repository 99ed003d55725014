use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::{AuthRoute, Dispatcher, Stage};
use crate::session::SessionStore;

mod builder;
mod impls;

pub use builder::ApiClientBuilder;

/// Gateway through which every backend call passes.
///
/// Cloning is cheap; clones share the session store and the refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: Config,
    dispatcher: Dispatcher,
    auth: AuthRoute,
    stages: Vec<Arc<dyn Stage>>,
    store: Arc<dyn SessionStore>,
}
