use std::sync::Arc;

use crate::errors::Error;

use super::{ApiRequest, ApiResponse, Dispatcher, Next, Stage};

/// Route for the token endpoints.
///
/// Login and refresh skip credential attachment and refresh-and-retry, but
/// still pass through the diagnostics stage when it is enabled.
#[derive(Clone)]
pub struct AuthRoute {
    stages: Arc<[Arc<dyn Stage>]>,
    dispatcher: Dispatcher,
}

impl AuthRoute {
    pub fn new(stages: Vec<Arc<dyn Stage>>, dispatcher: Dispatcher) -> Self {
        Self {
            stages: stages.into(),
            dispatcher,
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        Next::new(&self.stages, &self.dispatcher).run(request).await
    }
}
