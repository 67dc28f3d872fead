pub mod testimonial;

use crate::error::AppError;

/// Fallback for unmatched paths and methods.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
