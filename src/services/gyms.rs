use crate::{ApiClient, ApiRequest, ApiResponse, Error};

pub struct GymService<'a> {
    client: &'a ApiClient,
}

impl<'a> GymService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse, Error> {
        self.client.get("/gyms/").await
    }

    /// Full-text search over gym name and address.
    pub async fn search(&self, query: &str) -> Result<ApiResponse, Error> {
        self.client
            .send(ApiRequest::get("/gyms/").query("search", query))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<ApiResponse, Error> {
        self.client.get(&format!("/gyms/{id}/")).await
    }

    pub async fn equipment(&self, gym: u64) -> Result<ApiResponse, Error> {
        self.client
            .send(ApiRequest::get("/gyms/equipment/").query("gym", gym))
            .await
    }
}
