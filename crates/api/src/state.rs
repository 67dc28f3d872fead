use std::sync::Arc;

use institute_db::store::TestimonialStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Testimonial storage: PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn TestimonialStore>,
}
