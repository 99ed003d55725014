use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use crate::config::Config;
use crate::errors::Error;

use super::{ApiRequest, ApiResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Terminal stage: turns an [`ApiRequest`] into one HTTP exchange.
///
/// Never retries and never touches the session store.
#[derive(Clone)]
pub struct Dispatcher {
    http_client: Client,
    api_root: String,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_root = config.api_root()?;
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            api_root,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, Error> {
        let path = request.path();
        let joined = if path.starts_with('/') {
            format!("{}{}", self.api_root, path)
        } else {
            format!("{}/{}", self.api_root, path)
        };
        let mut url = Url::parse(&joined)
            .map_err(|e| Error::Request(format!("Invalid request URL '{}': {}", joined, e)))?;
        if !request.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_pairs());
        }
        Ok(url)
    }

    pub async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.resolve(&request)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in request.headers() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self
            .http_client
            .request(request.method().clone(), url)
            .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await?;
        let body = parse_body(&bytes);

        if status.is_success() {
            match body {
                Ok(body) => Ok(ApiResponse {
                    status,
                    headers,
                    body,
                }),
                Err(source) => Err(Error::Decode { status, source }),
            }
        } else {
            Err(Error::Status {
                status,
                body: body.ok().filter(|b| !b.is_null()),
                headers,
            })
        }
    }
}

fn parse_body(bytes: &[u8]) -> Result<serde_json::Value, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(bytes)
}
