//! Admin contact form submission endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use showcase_core::models::{Submission, SubmissionField, SubmissionFilter, MAX_SUBMISSION_PAGE_SIZE};
use showcase_core::{ListParams, Page};

use crate::db::{DbError, SUBMISSION};
use crate::http::auth::{perm, Authorized};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidQuery};
use crate::state::AppState;

/// GET /contact - filtered, sorted, paginated (newest first by default)
async fn list_submissions(
    _auth: Authorized<perm::ManageContactForms>,
    State(state): State<Arc<AppState>>,
    ValidQuery(filter): ValidQuery<SubmissionFilter>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Page<Submission>>, ApiError> {
    let filter = filter.validate()?;
    let options = params.into_options::<SubmissionField>(Some(MAX_SUBMISSION_PAGE_SIZE))?;
    let results = state.submissions.list(&filter, &options).await?;
    let total = state.submissions.count(&filter).await?;

    Ok(Json(Page::new(results, options.pagination, total)))
}

/// GET /contact/{id}
async fn get_submission(
    _auth: Authorized<perm::GetContactForms>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Submission>, ApiError> {
    let submission = state
        .submissions
        .get(id)
        .await?
        .ok_or(DbError::not_found(SUBMISSION, id))?;
    Ok(Json(submission))
}

/// DELETE /contact/{id}
async fn delete_submission(
    _auth: Authorized<perm::ManageContactForms>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.submissions.delete(id).await?;
    tracing::info!(id, "submission deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", get(list_submissions))
        .route("/contact/{id}", get(get_submission).delete(delete_submission))
}
