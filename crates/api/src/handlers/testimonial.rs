//! Handlers for the testimonial endpoints.
//!
//! Reads are public. Writes require a [`BearerToken`] and parse their body
//! from raw bytes so a malformed payload surfaces the parser's message.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use institute_core::testimonial::TestimonialFilter;
use institute_db::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{BearerToken, TestimonialId};
use crate::state::AppState;

/// Body of a successful `DELETE /testimonials/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /testimonials
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Testimonial>>> {
    let rows = state.store.list(TestimonialFilter::Active).await?;
    Ok(Json(rows))
}

/// GET /testimonials/featured
pub async fn list_featured(State(state): State<AppState>) -> AppResult<Json<Vec<Testimonial>>> {
    let rows = state.store.list(TestimonialFilter::Featured).await?;
    Ok(Json(rows))
}

/// POST /testimonials
///
/// Returns 201 with the stored row.
pub async fn create(
    State(state): State<AppState>,
    _token: BearerToken,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateTestimonial = serde_json::from_slice(&body)?;
    let row = state.store.create(&input).await?;

    tracing::info!(id = %row.id, student = %row.student_name, "Testimonial created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /testimonials/{id}
pub async fn update(
    State(state): State<AppState>,
    TestimonialId(id): TestimonialId,
    _token: BearerToken,
    body: Bytes,
) -> AppResult<Json<Testimonial>> {
    let input: UpdateTestimonial = serde_json::from_slice(&body)?;
    let row = state
        .store
        .update(id, &input)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(%id, is_active = row.is_active, "Testimonial updated");
    Ok(Json(row))
}

/// DELETE /testimonials/{id}
///
/// Soft delete. Succeeds whether or not the id matched a row.
pub async fn delete(
    State(state): State<AppState>,
    TestimonialId(id): TestimonialId,
    _token: BearerToken,
) -> AppResult<Json<DeleteResponse>> {
    let matched = state.store.deactivate(id).await?;

    tracing::info!(%id, matched, "Testimonial deactivated");
    Ok(Json(DeleteResponse { success: true }))
}
