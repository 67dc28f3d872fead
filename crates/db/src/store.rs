//! The storage seam behind the testimonial endpoints.

use async_trait::async_trait;
use institute_core::testimonial::TestimonialFilter;
use institute_core::types::DbId;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

/// Failure reported by a [`TestimonialStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A table constraint rejected the write.
    #[error("{0}")]
    Constraint(String),
}

/// Row reads and writes against the `testimonials` table.
///
/// Implementations perform no validation of their own beyond what the table
/// enforces; every public read is filtered through [`TestimonialFilter`] and
/// ordered by `display_order` ascending.
#[async_trait]
pub trait TestimonialStore: Send + Sync {
    /// Rows passing `filter`, ordered by `display_order`.
    async fn list(&self, filter: TestimonialFilter) -> Result<Vec<Testimonial>, StoreError>;

    /// Privileged lookup that ignores `is_active`.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Testimonial>, StoreError>;

    /// Insert a new active row with defaults applied.
    async fn create(&self, input: &CreateTestimonial) -> Result<Testimonial, StoreError>;

    /// Replace every editable field of row `id` and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(
        &self,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, StoreError>;

    /// Soft delete: flip `is_active` to false. Returns whether a row matched.
    async fn deactivate(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
