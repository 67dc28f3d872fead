//! Testimonial read filters, defaults and avatar selection.
//!
//! [`TestimonialFilter`] is the one place the soft-delete rule lives: every
//! read path, SQL or in-memory, goes through it.

use serde::Serialize;

/// Default `display_order` for a testimonial created without one.
pub const DEFAULT_DISPLAY_ORDER: i32 = 0;

/// Default `is_featured` for a testimonial created without one.
pub const DEFAULT_IS_FEATURED: bool = false;

/// Which rows a public read returns. Inactive rows are never included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestimonialFilter {
    /// All active testimonials.
    Active,
    /// Active testimonials flagged for the home page.
    Featured,
}

impl TestimonialFilter {
    /// Whether a row with the given flags passes this filter.
    pub fn matches(self, is_active: bool, is_featured: bool) -> bool {
        match self {
            TestimonialFilter::Active => is_active,
            TestimonialFilter::Featured => is_active && is_featured,
        }
    }

    /// SQL predicate equivalent to [`TestimonialFilter::matches`].
    pub fn sql_predicate(self) -> &'static str {
        match self {
            TestimonialFilter::Active => "is_active = true",
            TestimonialFilter::Featured => "is_active = true AND is_featured = true",
        }
    }
}

/// How a testimonial card shows its student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Avatar {
    Image(String),
    /// Rendered as a coloured circle with a single letter.
    Initials(char),
}

/// Pick the avatar for a testimonial. A missing or blank image URL falls
/// back to the first letter of the student's name.
pub fn avatar_for(student_name: &str, image_url: Option<&str>) -> Avatar {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => Avatar::Image(url.to_string()),
        _ => Avatar::Initials(
            student_name
                .trim()
                .chars()
                .next()
                .map(|c| c.to_uppercase().next().unwrap_or(c))
                .unwrap_or('?'),
        ),
    }
}
