//! Request pipeline: ordered stages in front of the [`Dispatcher`].
//!
//! Each stage receives the request and a [`Next`] handle for the rest of the
//! chain. It may rewrite the request, short-circuit, or call `next.run`
//! (more than once, for replays).

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Error;

mod attach;
mod auth;
mod diagnostics;
mod dispatch;
mod refresh;
mod request;
mod response;

pub use attach::CredentialAttachment;
pub use auth::AuthRoute;
pub use diagnostics::Diagnostics;
pub use dispatch::Dispatcher;
pub use refresh::{REFRESH_PATH, RefreshAndRetry};
pub use request::ApiRequest;
pub use response::ApiResponse;

#[async_trait]
pub trait Stage: Send + Sync {
    async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse, Error>;
}

/// The remainder of the pipeline after the current stage.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    stages: &'a [Arc<dyn Stage>],
    dispatcher: &'a Dispatcher,
}

impl<'a> Next<'a> {
    pub fn new(stages: &'a [Arc<dyn Stage>], dispatcher: &'a Dispatcher) -> Self {
        Self { stages, dispatcher }
    }

    pub async fn run(self, request: ApiRequest) -> Result<ApiResponse, Error> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                stage
                    .handle(
                        request,
                        Next {
                            stages: rest,
                            dispatcher: self.dispatcher,
                        },
                    )
                    .await
            }
            None => self.dispatcher.dispatch(request).await,
        }
    }
}
