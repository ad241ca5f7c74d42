//! Data models
//!
//! Mirrors the staff-zone service payloads. All IDs are opaque strings
//! assigned by the remote system.

pub mod staff;
pub mod staff_zone;
pub mod zone;

// Re-exports
pub use staff::*;
pub use staff_zone::*;
pub use zone::*;
