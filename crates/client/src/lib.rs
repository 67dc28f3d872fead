//! Typed HTTP client for the testimonial service.
//!
//! Used by the public pages (featured feed for the rotator) and by admin
//! tooling (create, update, soft delete).

pub mod api;
pub mod config;

pub use api::{ClientError, TestimonialClient};
pub use config::ClientConfig;
