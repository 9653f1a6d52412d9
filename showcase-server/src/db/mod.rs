//! Persistence layer - store traits and their implementations
//!
//! # Design Principles
//!
//! - Handlers talk to `dyn FeatureStore` / `dyn SubmissionStore`, never to a pool
//! - Uniqueness is the store's job (unique index / check under the write lock)
//! - One statement per operation; no multi-record transactions
//! - PostgreSQL and in-memory stores share the filter/sort types from
//!   `showcase_core::query`, so both order and slice identically

pub mod memory;
pub mod pool;
pub mod query;
pub mod repos;
pub mod schema;

use async_trait::async_trait;

use showcase_core::models::{
    Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature, NewSubmission, Submission,
    SubmissionField, SubmissionFilter,
};
use showcase_core::ListOptions;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::{PgFeatureStore, PgSubmissionStore};

/// Display name used in feature errors
pub const FEATURE: &str = "Feature";

/// Display name used in submission errors
pub const SUBMISSION: &str = "Contact form submission";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{resource} with {field} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

/// Feature persistence
#[async_trait]
pub trait FeatureStore: Send + Sync + 'static {
    /// Insert a feature; a taken title is a `Conflict`.
    async fn create(&self, input: &NewFeature) -> Result<Feature, DbError>;

    async fn get(&self, id: i64) -> Result<Option<Feature>, DbError>;

    /// One page of features matching `filter`.
    async fn list(
        &self,
        filter: &FeatureFilter,
        options: &ListOptions<FeatureField>,
    ) -> Result<Vec<Feature>, DbError>;

    /// Number of features matching `filter`, ignoring pagination.
    async fn count(&self, filter: &FeatureFilter) -> Result<u64, DbError>;

    /// Apply a partial update; `NotFound` if `id` is absent.
    async fn update(&self, id: i64, patch: &FeaturePatch) -> Result<Feature, DbError>;

    /// Remove a feature; `NotFound` if `id` is absent.
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Every feature, oldest first, for the public landing page.
    async fn list_public(&self) -> Result<Vec<Feature>, DbError>;

    /// Insert unless the title is already present. Returns whether a row was added.
    async fn insert_if_absent(&self, input: &NewFeature) -> Result<bool, DbError>;
}

/// Contact form submission persistence
#[async_trait]
pub trait SubmissionStore: Send + Sync + 'static {
    async fn create(&self, input: &NewSubmission) -> Result<Submission, DbError>;

    async fn get(&self, id: i64) -> Result<Option<Submission>, DbError>;

    async fn list(
        &self,
        filter: &SubmissionFilter,
        options: &ListOptions<SubmissionField>,
    ) -> Result<Vec<Submission>, DbError>;

    async fn count(&self, filter: &SubmissionFilter) -> Result<u64, DbError>;

    /// Remove a submission; `NotFound` if `id` is absent.
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Remove every submission, returning how many were removed.
    async fn clear(&self) -> Result<u64, DbError>;
}
