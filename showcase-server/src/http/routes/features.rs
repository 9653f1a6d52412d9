//! Admin feature endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use showcase_core::models::{Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature};
use showcase_core::{ListParams, Page};

use crate::db::{DbError, FEATURE};
use crate::http::auth::{perm, Authorized};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFeatureRequest {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFeatureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// POST /features
async fn create_feature(
    _auth: Authorized<perm::ManageFeatures>,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateFeatureRequest>,
) -> Result<(StatusCode, Json<Feature>), ApiError> {
    let input = NewFeature::new(&req.title, &req.description, &req.icon, &req.color)?;
    let feature = state.features.create(&input).await?;
    tracing::info!(id = feature.id, title = %feature.title, "feature created");

    Ok((StatusCode::CREATED, Json(feature)))
}

/// GET /features - filtered, sorted, paginated
async fn list_features(
    _auth: Authorized<perm::GetFeatures>,
    State(state): State<Arc<AppState>>,
    ValidQuery(filter): ValidQuery<FeatureFilter>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Page<Feature>>, ApiError> {
    let options = params.into_options::<FeatureField>(None)?;
    let results = state.features.list(&filter, &options).await?;
    let total = state.features.count(&filter).await?;

    Ok(Json(Page::new(results, options.pagination, total)))
}

/// GET /features/{id}
async fn get_feature(
    _auth: Authorized<perm::GetFeatures>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Feature>, ApiError> {
    let feature = state
        .features
        .get(id)
        .await?
        .ok_or(DbError::not_found(FEATURE, id))?;
    Ok(Json(feature))
}

/// PATCH /features/{id} - partial update, at least one field
async fn update_feature(
    _auth: Authorized<perm::ManageFeatures>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<UpdateFeatureRequest>,
) -> Result<Json<Feature>, ApiError> {
    let patch = FeaturePatch::new(
        req.title.as_deref(),
        req.description.as_deref(),
        req.icon.as_deref(),
        req.color.as_deref(),
    )?;
    let feature = state.features.update(id, &patch).await?;
    tracing::info!(id, "feature updated");

    Ok(Json(feature))
}

/// DELETE /features/{id}
async fn delete_feature(
    _auth: Authorized<perm::ManageFeatures>,
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.features.delete(id).await?;
    tracing::info!(id, "feature deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/features", get(list_features).post(create_feature))
        .route(
            "/features/{id}",
            get(get_feature).patch(update_feature).delete(delete_feature),
        )
}
