use axum::routing::{get, put};
use axum::Router;

use crate::handlers::testimonial;
use crate::state::AppState;

/// Testimonial routes.
///
/// ```text
/// GET    /testimonials            -> list
/// POST   /testimonials            -> create
/// GET    /testimonials/featured   -> list_featured
/// PUT    /testimonials/{id}       -> update
/// DELETE /testimonials/{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/testimonials",
            get(testimonial::list).post(testimonial::create),
        )
        .route("/testimonials/featured", get(testimonial::list_featured))
        .route(
            "/testimonials/{id}",
            put(testimonial::update).delete(testimonial::delete),
        )
}
