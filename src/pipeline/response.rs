use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::errors::Error;

/// A successful (2xx) response with its JSON body already parsed.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `Value::Null` when the server sent an empty body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        T::deserialize(&self.body).map_err(|source| Error::Decode {
            status: self.status,
            source,
        })
    }

    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let status = self.status;
        serde_json::from_value(self.body).map_err(|source| Error::Decode { status, source })
    }
}
