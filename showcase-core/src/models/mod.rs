//! Domain models with validation at construction
//!
//! All caller input is validated when building the `New*` / patch types.
//! Invalid input returns ValidationError, not panic.

pub mod feature;
pub mod submission;
pub mod validation;

pub use feature::{Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature, PublicFeature};
pub use submission::{
    NewSubmission, Submission, SubmissionField, SubmissionFilter, MAX_SUBMISSION_PAGE_SIZE,
};
pub use validation::ValidationError;
