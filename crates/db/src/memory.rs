//! In-process testimonial store.
//!
//! Mirrors the PostgreSQL table closely enough that the HTTP layer cannot
//! tell the two apart: NOT NULL violations are reported with the same
//! wording, ids are random UUIDs and `updated_at` only ever moves forward.

use async_trait::async_trait;
use chrono::Utc;
use institute_core::testimonial::TestimonialFilter;
use institute_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use crate::store::{StoreError, TestimonialStore};

#[derive(Debug, Default)]
pub struct InMemoryTestimonialStore {
    rows: RwLock<Vec<Testimonial>>,
}

impl InMemoryTestimonialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, inactive ones included.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn not_null(column: &'static str, value: &Option<String>) -> Result<String, StoreError> {
    value.clone().ok_or_else(|| {
        StoreError::Constraint(format!(
            "null value in column \"{column}\" of relation \"testimonials\" violates not-null constraint"
        ))
    })
}

/// Current time, nudged past `previous` when the clock has not moved.
fn later_than(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[async_trait]
impl TestimonialStore for InMemoryTestimonialStore {
    async fn list(&self, filter: TestimonialFilter) -> Result<Vec<Testimonial>, StoreError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<Testimonial> = rows
            .iter()
            .filter(|row| filter.matches(row.is_active, row.is_featured))
            .cloned()
            .collect();
        // Stable sort keeps insertion (creation) order between equal keys.
        matching.sort_by_key(|row| row.display_order);
        Ok(matching)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Testimonial>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn create(&self, input: &CreateTestimonial) -> Result<Testimonial, StoreError> {
        let now = Utc::now();
        let row = Testimonial {
            id: uuid::Uuid::new_v4(),
            student_name: not_null("student_name", &input.student_name)?,
            exam_name: not_null("exam_name", &input.exam_name)?,
            success_story: not_null("success_story", &input.success_story)?,
            ranking_or_score: not_null("ranking_or_score", &input.ranking_or_score)?,
            image_url: input.resolved_image_url().map(str::to_string),
            is_featured: input.resolved_is_featured(),
            display_order: input.resolved_display_order(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(row.clone());
        tracing::debug!(id = %row.id, "Testimonial created (in-memory)");
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, StoreError> {
        let fields = &input.fields;
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        // Check every constraint before touching the row so a failed update
        // leaves it unchanged.
        let student_name = not_null("student_name", &fields.student_name)?;
        let exam_name = not_null("exam_name", &fields.exam_name)?;
        let success_story = not_null("success_story", &fields.success_story)?;
        let ranking_or_score = not_null("ranking_or_score", &fields.ranking_or_score)?;

        row.student_name = student_name;
        row.exam_name = exam_name;
        row.success_story = success_story;
        row.ranking_or_score = ranking_or_score;
        row.image_url = fields.resolved_image_url().map(str::to_string);
        row.is_featured = fields.resolved_is_featured();
        row.display_order = fields.resolved_display_order();
        if let Some(is_active) = input.is_active {
            row.is_active = is_active;
        }
        row.updated_at = later_than(row.updated_at);
        Ok(Some(row.clone()))
    }

    async fn deactivate(&self, id: DbId) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn story(name: &str, order: i32, featured: bool) -> CreateTestimonial {
        CreateTestimonial {
            display_order: Some(order),
            is_featured: Some(featured),
            ..CreateTestimonial::new(name, "SSC CGL", "Cleared on the first attempt.", "AIR 42")
        }
    }

    fn full_update(row: &Testimonial) -> UpdateTestimonial {
        UpdateTestimonial {
            fields: CreateTestimonial {
                student_name: Some(row.student_name.clone()),
                exam_name: Some(row.exam_name.clone()),
                success_story: Some(row.success_story.clone()),
                ranking_or_score: Some(row.ranking_or_score.clone()),
                image_url: row.image_url.clone(),
                is_featured: Some(row.is_featured),
                display_order: Some(row.display_order),
            },
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = InMemoryTestimonialStore::new();
        let row = store
            .create(&CreateTestimonial::new("Ravi", "RRB NTPC", "...", "Selected"))
            .await
            .unwrap();

        assert!(row.is_active);
        assert!(!row.is_featured);
        assert_eq!(row.display_order, 0);
        assert_eq!(row.image_url, None);
        assert_eq!(row.created_at, row.updated_at);
    }

    #[tokio::test]
    async fn test_create_rejects_null_required_field() {
        let store = InMemoryTestimonialStore::new();
        let input = CreateTestimonial {
            exam_name: None,
            ..CreateTestimonial::new("Ravi", "x", "...", "Selected")
        };
        let err = store.create(&input).await.unwrap_err();
        assert_matches!(&err, StoreError::Constraint(msg) if msg.contains("exam_name"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let store = InMemoryTestimonialStore::new();
        let c = store.create(&story("C", 3, true)).await.unwrap();
        let a = store.create(&story("A", 1, false)).await.unwrap();
        let b = store.create(&story("B", 2, true)).await.unwrap();
        store.deactivate(c.id).await.unwrap();

        let active = store.list(TestimonialFilter::Active).await.unwrap();
        let ids: Vec<_> = active.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        let featured = store.list(TestimonialFilter::Featured).await.unwrap();
        let ids: Vec<_> = featured.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[tokio::test]
    async fn test_deactivate_keeps_row() {
        let store = InMemoryTestimonialStore::new();
        let row = store.create(&story("A", 1, true)).await.unwrap();

        assert!(store.deactivate(row.id).await.unwrap());
        let kept = store.find_by_id(row.id).await.unwrap().unwrap();
        assert!(!kept.is_active);
        assert_eq!(kept.student_name, "A");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_id() {
        let store = InMemoryTestimonialStore::new();
        assert!(!store.deactivate(uuid::Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_bumps_timestamp() {
        let store = InMemoryTestimonialStore::new();
        let row = store.create(&story("A", 4, true)).await.unwrap();

        let mut input = full_update(&row);
        input.fields.ranking_or_score = Some("AIR 7".to_string());
        input.fields.display_order = None;

        let updated = store.update(row.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.ranking_or_score, "AIR 7");
        assert_eq!(updated.display_order, 0, "omitted fields reset to defaults");
        assert!(updated.is_active, "is_active untouched when not supplied");
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn test_update_can_reactivate() {
        let store = InMemoryTestimonialStore::new();
        let row = store.create(&story("A", 1, false)).await.unwrap();
        store.deactivate(row.id).await.unwrap();

        let mut input = full_update(&row);
        input.is_active = Some(true);
        let updated = store.update(row.id, &input).await.unwrap().unwrap();
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_row_unchanged() {
        let store = InMemoryTestimonialStore::new();
        let row = store.create(&story("A", 1, false)).await.unwrap();

        let mut input = full_update(&row);
        input.fields.success_story = None;
        input.fields.ranking_or_score = Some("changed".to_string());
        assert!(store.update(row.id, &input).await.is_err());

        let stored = store.find_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(stored, row);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = InMemoryTestimonialStore::new();
        let input = UpdateTestimonial {
            fields: CreateTestimonial::new("A", "B", "C", "D"),
            is_active: None,
        };
        assert!(store.update(uuid::Uuid::new_v4(), &input).await.unwrap().is_none());
    }
}
