//! Unauthenticated site endpoints: contact form and landing-page features

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use showcase_core::models::{NewSubmission, PublicFeature};

use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::notify::Notification;
use crate::state::AppState;

pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";

/// Contact form body
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub features: Vec<PublicFeature>,
}

/// POST /api/contact - store a submission and notify the owner
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let input = NewSubmission::new(&req.name, &req.email, &req.subject, &req.message)?;
    let submission = state.submissions.create(&input).await?;
    tracing::info!(id = submission.id, "contact form submitted");

    let notification = Notification::for_submission(&state.recipient, &submission);
    if let Err(e) = state.notifier.send(&notification).await {
        tracing::warn!(id = submission.id, error = %e, "submission notification failed");
    }

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_SUCCESS_MESSAGE,
    }))
}

/// GET /api/features - every feature, oldest first
async fn list_features(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let features = state.features.list_public().await?;

    Ok(Json(FeaturesResponse {
        features: features.into_iter().map(PublicFeature::from).collect(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/features", get(list_features))
}
