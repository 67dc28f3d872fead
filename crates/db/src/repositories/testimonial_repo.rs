//! PostgreSQL repository for the `testimonials` table.

use async_trait::async_trait;
use institute_core::testimonial::TestimonialFilter;
use institute_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use crate::store::{StoreError, TestimonialStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_name, exam_name, success_story, ranking_or_score, \
                       image_url, is_featured, display_order, is_active, created_at, updated_at";

/// Provides CRUD operations for testimonials.
#[derive(Debug, Clone)]
pub struct TestimonialRepo {
    pool: PgPool,
}

impl TestimonialRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialStore for TestimonialRepo {
    async fn list(&self, filter: TestimonialFilter) -> Result<Vec<Testimonial>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials WHERE {} \
             ORDER BY display_order ASC, created_at ASC",
            filter.sql_predicate()
        );
        let rows = sqlx::query_as::<_, Testimonial>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Testimonial>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        let row = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &CreateTestimonial) -> Result<Testimonial, StoreError> {
        let query = format!(
            "INSERT INTO testimonials \
                (student_name, exam_name, success_story, ranking_or_score, \
                 image_url, is_featured, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.student_name)
            .bind(&input.exam_name)
            .bind(&input.success_story)
            .bind(&input.ranking_or_score)
            .bind(input.resolved_image_url())
            .bind(input.resolved_is_featured())
            .bind(input.resolved_display_order())
            .fetch_one(&self.pool)
            .await?;
        tracing::info!(id = %row.id, "Testimonial created");
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, StoreError> {
        let fields = &input.fields;
        let query = format!(
            "UPDATE testimonials SET \
                student_name = $2, \
                exam_name = $3, \
                success_story = $4, \
                ranking_or_score = $5, \
                image_url = $6, \
                is_featured = $7, \
                display_order = $8, \
                is_active = COALESCE($9, is_active), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&fields.student_name)
            .bind(&fields.exam_name)
            .bind(&fields.success_story)
            .bind(&fields.ranking_or_score)
            .bind(fields.resolved_image_url())
            .bind(fields.resolved_is_featured())
            .bind(fields.resolved_display_order())
            .bind(input.is_active)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn deactivate(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE testimonials SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
