//! showcase-core: domain layer for the showcase site backend
//!
//! Records and their validators, the shared filter/sort/paginate layer,
//! the static role table, configuration, and seed content. No network or
//! database code lives here.

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod roles;
pub mod seed;

pub use config::ShowcaseConfig;
pub use error::ConfigError;
pub use models::{
    Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature, NewSubmission, PublicFeature,
    Submission, SubmissionField, SubmissionFilter, ValidationError,
};
pub use pagination::{Page, Pagination};
pub use query::{ListOptions, ListParams, Record, RecordFilter, SortDirection, SortField, SortSpec};
pub use roles::{role_rights, Permission, Role};
