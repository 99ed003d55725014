#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gym_api_gateway::{ApiClient, Config, InMemorySessionStore, LoginRedirect};
use wiremock::{MockServer, Request};

#[derive(Default)]
pub struct RecordingRedirect {
    routes: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub store: Arc<InMemorySessionStore>,
    pub redirect: Arc<RecordingRedirect>,
}

pub fn config(server: &MockServer) -> Config {
    Config::from_values(server.uri(), None, None, None)
}

pub fn harness(server: &MockServer, store: InMemorySessionStore) -> Harness {
    let store = Arc::new(store);
    let redirect = Arc::new(RecordingRedirect::default());
    let client = ApiClient::builder(config(server))
        .session_store(store.clone())
        .login_redirect(redirect.clone())
        .build()
        .expect("client builds");
    Harness {
        client,
        store,
        redirect,
    }
}

pub fn signed_in(server: &MockServer, access: &str, refresh: &str) -> Harness {
    harness(
        server,
        InMemorySessionStore::with_credentials(access, Some(refresh.to_string())),
    )
}

pub fn authorization(req: &Request) -> Option<String> {
    req.headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

pub async fn requests_to(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route)
        .collect()
}
