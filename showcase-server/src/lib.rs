//! showcase-server: HTTP API for the showcase site
//!
//! Public contact form and feature list, plus token-guarded admin CRUD over
//! features and submissions. Runs against PostgreSQL or an in-memory store.

pub mod db;
pub mod http;
pub mod notify;
pub mod seed;
pub mod state;

pub use db::{DbError, FeatureStore, MemoryStore, SubmissionStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use notify::{LogNotifier, Notification, Notifier, NotifyError, WebhookNotifier};
pub use state::AppState;
