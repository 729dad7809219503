use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use travelingo_core::StoredInquiry;

use crate::error::AppError;
use crate::state::AppState;

pub const SUBMITTED_MESSAGE: &str = "Inquiry submitted successfully.";

#[derive(Debug, Serialize)]
pub struct InquiryCreatedResponse {
    pub message: &'static str,
    pub data: StoredInquiry,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/travel-inquiries/", post(create_inquiry))
        .route("/api/travel-inquiries", post(create_inquiry))
}

/// POST /api/travel-inquiries/
async fn create_inquiry(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<InquiryCreatedResponse>), AppError> {
    let Json(payload) = body?;

    let stored = state.inquiries.submit(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(InquiryCreatedResponse {
            message: SUBMITTED_MESSAGE,
            data: stored,
        }),
    ))
}
