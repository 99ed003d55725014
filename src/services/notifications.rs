use serde::Serialize;
use serde_json::json;

use crate::{ApiClient, ApiRequest, ApiResponse, Error};

pub struct NotificationService<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse, Error> {
        self.client.get("/notifications/").await
    }

    pub async fn unread(&self) -> Result<ApiResponse, Error> {
        self.client
            .send(ApiRequest::get("/notifications/").query("is_read", false))
            .await
    }

    pub async fn mark_read(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client
            .patch(&format!("/notifications/{id}/"), &json!({ "is_read": true }))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<ApiResponse, Error> {
        self.client
            .send(ApiRequest::post("/notifications/mark-all-read/"))
            .await
    }

    pub async fn settings(&self) -> Result<ApiResponse, Error> {
        self.client.get("/notifications/settings/").await
    }

    pub async fn create_settings<B: Serialize + ?Sized>(
        &self,
        settings: &B,
    ) -> Result<ApiResponse, Error> {
        self.client.post("/notifications/settings/", settings).await
    }

    pub async fn update_settings<B: Serialize + ?Sized>(
        &self,
        id: u64,
        changes: &B,
    ) -> Result<ApiResponse, Error> {
        self.client
            .patch(&format!("/notifications/settings/{id}/"), changes)
            .await
    }
}
