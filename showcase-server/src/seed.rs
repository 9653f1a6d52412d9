//! Load sample content into a store
//!
//! Features are inserted by title and existing rows are left alone.
//! Submissions are replaced wholesale.

use showcase_core::seed::{sample_features, sample_submissions};
use showcase_core::ValidationError;

use crate::db::{DbError, FeatureStore, SubmissionStore};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid sample data: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// What a seed run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub features_added: usize,
    pub features_skipped: usize,
    pub submissions_removed: u64,
    pub submissions_added: usize,
}

pub async fn run(
    features: &dyn FeatureStore,
    submissions: &dyn SubmissionStore,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for feature in sample_features()? {
        if features.insert_if_absent(&feature).await? {
            report.features_added += 1;
        } else {
            tracing::debug!(title = feature.title(), "feature already present");
            report.features_skipped += 1;
        }
    }

    let samples = sample_submissions()?;
    report.submissions_removed = submissions.clear().await?;
    for submission in &samples {
        submissions.create(submission).await?;
    }
    report.submissions_added = samples.len();

    tracing::info!(
        features_added = report.features_added,
        features_skipped = report.features_skipped,
        submissions_added = report.submissions_added,
        "seed complete"
    );
    Ok(report)
}
