//! Office Client - HTTP client for the back-office staff-zone service
//!
//! Provides network-based calls to the remote REST API and the
//! [`StaffZoneService`] trait the staff board is written against.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use service::{HttpStaffZoneService, StaffZoneService};

// Re-export shared types for convenience
pub use shared::{ServiceError, ServiceResponse, ServiceResult};
