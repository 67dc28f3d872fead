//! Domain building blocks for the institute website.
//!
//! Everything here is free of I/O except the rotation driver, which owns a
//! tokio task per carousel instance.

pub mod error;
pub mod navigation;
pub mod rotation;
pub mod testimonial;
pub mod types;
