use crate::{ApiClient, ApiResponse, Error};

/// Aggregate dashboards, readable by staff accounts only.
pub struct AdminService<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<ApiResponse, Error> {
        self.client.get("/analytics/admin-dashboard/stats/").await
    }

    pub async fn attendance_heatmap(&self) -> Result<ApiResponse, Error> {
        self.client
            .get("/analytics/admin-dashboard/attendance-heatmap/")
            .await
    }
}
