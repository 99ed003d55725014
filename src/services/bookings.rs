use serde::Serialize;
use serde_json::json;

use crate::{ApiClient, ApiResponse, Error, types::NewBooking};

pub struct BookingService<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn mine(&self) -> Result<ApiResponse, Error> {
        self.client.get("/bookings/my-bookings/").await
    }

    pub async fn upcoming(&self) -> Result<ApiResponse, Error> {
        self.client.get("/bookings/upcoming/").await
    }

    pub async fn create(&self, booking: &NewBooking) -> Result<ApiResponse, Error> {
        self.client.post("/bookings/", booking).await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client.get(&format!("/bookings/{id}/")).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: u64,
        changes: &B,
    ) -> Result<ApiResponse, Error> {
        self.client.patch(&format!("/bookings/{id}/"), changes).await
    }

    /// Cancels without deleting; the booking stays in history.
    pub async fn cancel(&self, id: u64) -> Result<ApiResponse, Error> {
        self.update(id, &json!({ "status": "cancelled" })).await
    }

    pub async fn delete(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client.delete(&format!("/bookings/{id}/")).await
    }
}
