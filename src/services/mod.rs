//! Thin per-area wrappers over [`ApiClient`](crate::ApiClient).
//!
//! Each operation is one gateway call with a fixed method and path; responses
//! are returned as [`ApiResponse`](crate::ApiResponse) for the caller to decode.

mod admin;
mod analytics;
mod bookings;
mod gyms;
mod notifications;
mod payments;
mod subscriptions;
mod users;

pub use admin::AdminService;
pub use analytics::{AnalyticsKind, AnalyticsService};
pub use bookings::BookingService;
pub use gyms::GymService;
pub use notifications::NotificationService;
pub use payments::PaymentService;
pub use subscriptions::SubscriptionService;
pub use users::UserService;
