use serde_json::json;

use crate::{ApiClient, ApiResponse, Error, types::NewSubscription};

pub struct SubscriptionService<'a> {
    client: &'a ApiClient,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn mine(&self) -> Result<ApiResponse, Error> {
        self.client.get("/subscriptions/my-subscriptions/").await
    }

    pub async fn plans(&self) -> Result<ApiResponse, Error> {
        self.client.get("/subscriptions/membership-plans/").await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client.get(&format!("/subscriptions/{id}/")).await
    }

    pub async fn create(&self, subscription: &NewSubscription) -> Result<ApiResponse, Error> {
        self.client.post("/subscriptions/", subscription).await
    }

    pub async fn cancel(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client
            .patch(
                &format!("/subscriptions/{id}/"),
                &json!({ "status": "cancelled" }),
            )
            .await
    }
}
