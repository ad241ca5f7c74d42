//! Shared types for the back-office staff board
//!
//! Domain models, the service response envelope and the service error type.
//! These types are shared between `office-client` and `staff-board`.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{ServiceError, ServiceResult};
pub use response::{ListResult, ServiceResponse};
pub use serde::{Deserialize, Serialize};
