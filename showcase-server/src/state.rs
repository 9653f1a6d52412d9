//! Application state shared across handlers

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use showcase_core::{Role, ShowcaseConfig};

use crate::db::{FeatureStore, MemoryStore, PgFeatureStore, PgSubmissionStore, SubmissionStore};
use crate::notify::{LogNotifier, Notifier, NotifyError, WebhookNotifier};

/// Shared application state
///
/// Stores and notifier are trait objects so the same router serves
/// PostgreSQL, the in-memory store, and test doubles.
#[derive(Clone)]
pub struct AppState {
    pub features: Arc<dyn FeatureStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Bearer token -> role
    pub tokens: HashMap<String, Role>,
    /// Where new-submission notifications go
    pub recipient: String,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn postgres(pool: PgPool, config: &ShowcaseConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            features: Arc::new(PgFeatureStore::new(pool.clone())),
            submissions: Arc::new(PgSubmissionStore::new(pool)),
            notifier: notifier_from(config)?,
            tokens: config.token_roles(),
            recipient: config.notify.recipient.clone(),
        })
    }

    /// State backed by an in-memory store.
    pub fn in_memory(store: MemoryStore, config: &ShowcaseConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            features: Arc::new(store.clone()),
            submissions: Arc::new(store),
            notifier: notifier_from(config)?,
            tokens: config.token_roles(),
            recipient: config.notify.recipient.clone(),
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Role bound to `token`, if any.
    pub fn role_for(&self, token: &str) -> Option<Role> {
        self.tokens.get(token).copied()
    }
}

fn notifier_from(config: &ShowcaseConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    match &config.notify.webhook_url {
        Some(url) => {
            tracing::info!(url = %url, "submission notifications via webhook");
            Ok(Arc::new(WebhookNotifier::new(url.clone())?))
        }
        None => Ok(Arc::new(LogNotifier)),
    }
}
