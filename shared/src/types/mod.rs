//! Type definitions shared by API responses
//!
//! - `response` - health check response

pub mod response;

pub use response::HealthResponse;
