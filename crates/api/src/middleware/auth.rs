//! Request guards for the testimonial endpoints.

use axum::extract::{FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use institute_core::types::DbId;

use crate::error::AppError;

/// Credential presented in the `Authorization` header.
///
/// Only presence is checked; the token itself is not verified here. Use this
/// as an extractor on every mutating handler:
///
/// ```ignore
/// async fn create(_token: BearerToken, body: Bytes) -> AppResult<StatusCode> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        // A present but non-ASCII header still counts as presented.
        let raw = header.to_str().unwrap_or_default();
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

        Ok(BearerToken(token.to_string()))
    }
}

/// Testimonial id taken from the last path segment.
///
/// Anything that is not lowercase hex and dashes, or does not parse as a
/// UUID, is treated as an unmatched route.
#[derive(Debug, Clone, Copy)]
pub struct TestimonialId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for TestimonialId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        parse_testimonial_id(&raw)
            .map(TestimonialId)
            .ok_or(AppError::NotFound)
    }
}

/// Parse a path segment as a testimonial id.
pub fn parse_testimonial_id(raw: &str) -> Option<DbId> {
    let well_formed = !raw.is_empty()
        && raw
            .bytes()
            .all(|b| matches!(b, b'a'..=b'f' | b'0'..=b'9' | b'-'));
    if !well_formed {
        return None;
    }
    DbId::parse_str(raw).ok()
}
