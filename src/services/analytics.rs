use std::fmt;

use jiff::civil::Date;
use serde::Serialize;

use crate::{ApiClient, ApiRequest, ApiResponse, Error, types::RatingInput};

const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Report flavour for the extended analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsKind {
    #[default]
    General,
    Daily,
}

impl fmt::Display for AnalyticsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsKind::General => write!(f, "general"),
            AnalyticsKind::Daily => write!(f, "daily"),
        }
    }
}

/// Load predictions, attendance reports, preferences and ratings.
pub struct AnalyticsService<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn predictions(&self, gym: u64, date: Date) -> Result<ApiResponse, Error> {
        self.client
            .send(
                ApiRequest::get("/analytics/predictions/")
                    .query("gym", gym)
                    .query("date", date),
            )
            .await
    }

    pub async fn next_week(&self, gym: Option<u64>) -> Result<ApiResponse, Error> {
        let mut request = ApiRequest::get("/analytics/predictions/next_week/");
        if let Some(gym) = gym {
            request = request.query("gym", gym);
        }
        self.client.send(request).await
    }

    /// Predicted load of every gym for one hour of one day.
    pub async fn by_hour(&self, date: Date, hour: u8) -> Result<ApiResponse, Error> {
        self.client
            .send(
                ApiRequest::get("/analytics/predictions/by-hour/")
                    .query("date", date)
                    .query("hour", hour),
            )
            .await
    }

    pub async fn attendance_report(
        &self,
        gym: u64,
        start: Date,
        end: Date,
    ) -> Result<ApiResponse, Error> {
        self.client
            .send(
                ApiRequest::get("/analytics/reports/attendance/")
                    .query("gym", gym)
                    .query("start_date", start)
                    .query("end_date", end),
            )
            .await
    }

    pub async fn peak_hours(&self, gym: u64, days: Option<u32>) -> Result<ApiResponse, Error> {
        self.client
            .send(
                ApiRequest::get("/analytics/predictions/peak_hours/")
                    .query("gym", gym)
                    .query("days", days.unwrap_or(DEFAULT_WINDOW_DAYS)),
            )
            .await
    }

    pub async fn gym_comparison(&self, days: Option<u32>) -> Result<ApiResponse, Error> {
        self.client
            .send(
                ApiRequest::get("/analytics/predictions/gym_comparison/")
                    .query("days", days.unwrap_or(DEFAULT_WINDOW_DAYS)),
            )
            .await
    }

    pub async fn extended(
        &self,
        kind: AnalyticsKind,
        gym: Option<u64>,
        days: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let mut request = ApiRequest::get("/analytics/extended-analytics/")
            .query("type", kind)
            .query("days", days.unwrap_or(DEFAULT_WINDOW_DAYS));
        if let Some(gym) = gym {
            request = request.query("gym", gym);
        }
        self.client.send(request).await
    }

    pub async fn recommendations(&self) -> Result<ApiResponse, Error> {
        self.client.get("/analytics/recommendations/").await
    }

    pub async fn preferences(&self) -> Result<ApiResponse, Error> {
        self.client.get("/analytics/user-preferences/").await
    }

    pub async fn create_preferences<B: Serialize + ?Sized>(
        &self,
        preferences: &B,
    ) -> Result<ApiResponse, Error> {
        self.client
            .post("/analytics/user-preferences/", preferences)
            .await
    }

    pub async fn update_preferences<B: Serialize + ?Sized>(
        &self,
        id: u64,
        changes: &B,
    ) -> Result<ApiResponse, Error> {
        self.client
            .patch(&format!("/analytics/user-preferences/{id}/"), changes)
            .await
    }

    pub async fn gym_ratings(&self, gym: u64) -> Result<ApiResponse, Error> {
        self.client
            .send(ApiRequest::get("/analytics/gym-ratings/").query("gym", gym))
            .await
    }

    /// Creates the caller's rating, or updates it if one exists.
    pub async fn rate_gym(&self, rating: &RatingInput) -> Result<ApiResponse, Error> {
        self.client.post("/analytics/gym-ratings/", rating).await
    }
}
