//! Testimonial entity model and DTOs.
//!
//! Rows serialize with the table's snake_case column names. Request bodies
//! use camelCase and keep every text field optional: a missing field reaches
//! the store as NULL and the table's NOT NULL constraint decides.

use institute_core::testimonial::{avatar_for, Avatar, DEFAULT_DISPLAY_ORDER, DEFAULT_IS_FEATURED};
use institute_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: DbId,
    pub student_name: String,
    pub exam_name: String,
    pub success_story: String,
    pub ranking_or_score: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Testimonial {
    pub fn avatar(&self) -> Avatar {
        avatar_for(&self.student_name, self.image_url.as_deref())
    }
}

/// Body of `POST /testimonials`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonial {
    pub student_name: Option<String>,
    pub exam_name: Option<String>,
    pub success_story: Option<String>,
    pub ranking_or_score: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

impl CreateTestimonial {
    /// Payload with the four required fields set and every default left open.
    pub fn new(
        student_name: impl Into<String>,
        exam_name: impl Into<String>,
        success_story: impl Into<String>,
        ranking_or_score: impl Into<String>,
    ) -> Self {
        Self {
            student_name: Some(student_name.into()),
            exam_name: Some(exam_name.into()),
            success_story: Some(success_story.into()),
            ranking_or_score: Some(ranking_or_score.into()),
            ..Self::default()
        }
    }

    /// Image URL with an empty string treated as absent.
    pub fn resolved_image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn resolved_is_featured(&self) -> bool {
        self.is_featured.unwrap_or(DEFAULT_IS_FEATURED)
    }

    pub fn resolved_display_order(&self) -> i32 {
        self.display_order.unwrap_or(DEFAULT_DISPLAY_ORDER)
    }
}

/// Body of `PUT /testimonials/{id}`: a full-field replace plus an optional
/// activation toggle. Omitted optional fields reset to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[serde(flatten)]
    pub fields: CreateTestimonial,
    pub is_active: Option<bool>,
}
