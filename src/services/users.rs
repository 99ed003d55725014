use serde::Serialize;

use crate::{ApiClient, ApiResponse, Error, types::Registration};

pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, registration: &Registration) -> Result<ApiResponse, Error> {
        self.client.post("/users/register/", registration).await
    }

    pub async fn me(&self) -> Result<ApiResponse, Error> {
        self.client.get("/users/me/").await
    }

    pub async fn update_me<B: Serialize + ?Sized>(
        &self,
        changes: &B,
    ) -> Result<ApiResponse, Error> {
        self.client.patch("/users/me/", changes).await
    }
}
