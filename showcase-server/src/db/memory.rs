//! In-memory store
//!
//! Backs `serve --memory` and the router tests. Records live in insertion
//! order behind one `RwLock`; listing goes through the same `select`/`count`
//! evaluator the SQL builder mirrors.
//!
//! Ids and timestamps are strictly increasing per store, even when two
//! writes land within one clock tick.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use showcase_core::models::{
    Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature, NewSubmission, Submission,
    SubmissionField, SubmissionFilter,
};
use showcase_core::query::{count, select};
use showcase_core::ListOptions;

use super::{DbError, FeatureStore, SubmissionStore, FEATURE, SUBMISSION};

/// Shared in-memory tables; clones share the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    features: Vec<Feature>,
    submissions: Vec<Submission>,
    last_feature_id: i64,
    last_submission_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Current time, nudged forward past the previous stamp if needed.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.features
            .iter()
            .any(|f| f.title == title && Some(f.id) != except)
    }

    fn insert_feature(&mut self, input: &NewFeature) -> Feature {
        self.last_feature_id += 1;
        let now = self.tick();
        let feature = Feature {
            id: self.last_feature_id,
            title: input.title().to_owned(),
            description: input.description().to_owned(),
            icon: input.icon().to_owned(),
            color: input.color().to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.features.push(feature.clone());
        feature
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_conflict(title: &str) -> DbError {
    DbError::Conflict {
        resource: FEATURE,
        field: "title",
        value: title.to_owned(),
    }
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn create(&self, input: &NewFeature) -> Result<Feature, DbError> {
        let mut tables = self.inner.write().await;
        if tables.title_taken(input.title(), None) {
            return Err(title_conflict(input.title()));
        }
        Ok(tables.insert_feature(input))
    }

    async fn get(&self, id: i64) -> Result<Option<Feature>, DbError> {
        let tables = self.inner.read().await;
        Ok(tables.features.iter().find(|f| f.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &FeatureFilter,
        options: &ListOptions<FeatureField>,
    ) -> Result<Vec<Feature>, DbError> {
        let tables = self.inner.read().await;
        Ok(select(&tables.features, filter, options))
    }

    async fn count(&self, filter: &FeatureFilter) -> Result<u64, DbError> {
        let tables = self.inner.read().await;
        Ok(count(&tables.features, filter))
    }

    async fn update(&self, id: i64, patch: &FeaturePatch) -> Result<Feature, DbError> {
        let mut tables = self.inner.write().await;
        if !tables.features.iter().any(|f| f.id == id) {
            return Err(DbError::not_found(FEATURE, id));
        }
        if let Some(title) = patch.title() {
            if tables.title_taken(title, Some(id)) {
                return Err(title_conflict(title));
            }
        }

        let now = tables.tick();
        let feature = tables
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| DbError::not_found(FEATURE, id))?;
        patch.apply_to(feature, now);
        Ok(feature.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.inner.write().await;
        let before = tables.features.len();
        tables.features.retain(|f| f.id != id);
        if tables.features.len() == before {
            return Err(DbError::not_found(FEATURE, id));
        }
        Ok(())
    }

    async fn list_public(&self) -> Result<Vec<Feature>, DbError> {
        let tables = self.inner.read().await;
        let mut features = tables.features.clone();
        features.sort_by_key(|f| (f.created_at, f.id));
        Ok(features)
    }

    async fn insert_if_absent(&self, input: &NewFeature) -> Result<bool, DbError> {
        let mut tables = self.inner.write().await;
        if tables.title_taken(input.title(), None) {
            return Ok(false);
        }
        tables.insert_feature(input);
        Ok(true)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(&self, input: &NewSubmission) -> Result<Submission, DbError> {
        let mut tables = self.inner.write().await;
        tables.last_submission_id += 1;
        let submission = Submission {
            id: tables.last_submission_id,
            name: input.name().to_owned(),
            email: input.email().to_owned(),
            subject: input.subject().to_owned(),
            message: input.message().to_owned(),
            created_at: tables.tick(),
        };
        tables.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn get(&self, id: i64) -> Result<Option<Submission>, DbError> {
        let tables = self.inner.read().await;
        Ok(tables.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &SubmissionFilter,
        options: &ListOptions<SubmissionField>,
    ) -> Result<Vec<Submission>, DbError> {
        let tables = self.inner.read().await;
        Ok(select(&tables.submissions, filter, options))
    }

    async fn count(&self, filter: &SubmissionFilter) -> Result<u64, DbError> {
        let tables = self.inner.read().await;
        Ok(count(&tables.submissions, filter))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tables = self.inner.write().await;
        let before = tables.submissions.len();
        tables.submissions.retain(|s| s.id != id);
        if tables.submissions.len() == before {
            return Err(DbError::not_found(SUBMISSION, id));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut tables = self.inner.write().await;
        let removed = tables.submissions.len() as u64;
        tables.submissions.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::Pagination;

    fn feature(title: &str) -> NewFeature {
        NewFeature::new(title, "desc", "icon", "#fff").unwrap()
    }

    fn submission(name: &str) -> NewSubmission {
        NewSubmission::new(name, "a@b.com", "Hello", "Body").unwrap()
    }

    fn page<F>(page: u32, limit: u32) -> ListOptions<F> {
        ListOptions {
            pagination: Pagination::new(page, limit).unwrap(),
            sort: None,
        }
    }

    #[tokio::test]
    async fn ids_and_timestamps_strictly_increase() {
        let store = MemoryStore::new();
        let mut last: Option<Submission> = None;
        for i in 0..50 {
            let s = SubmissionStore::create(&store, &submission(&format!("n{}", i)))
                .await
                .unwrap();
            if let Some(prev) = &last {
                assert!(s.id > prev.id);
                assert!(s.created_at > prev.created_at);
            }
            last = Some(s);
        }
    }

    #[tokio::test]
    async fn duplicate_title_conflicts() {
        let store = MemoryStore::new();
        FeatureStore::create(&store, &feature("Fast")).await.unwrap();
        let err = FeatureStore::create(&store, &feature("Fast"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { field: "title", .. }));
    }

    #[tokio::test]
    async fn update_to_taken_title_conflicts_but_own_title_is_fine() {
        let store = MemoryStore::new();
        let a = FeatureStore::create(&store, &feature("A")).await.unwrap();
        FeatureStore::create(&store, &feature("B")).await.unwrap();

        let to_b = FeaturePatch::new(Some("B"), None, None, None).unwrap();
        assert!(matches!(
            store.update(a.id, &to_b).await,
            Err(DbError::Conflict { .. })
        ));

        let to_a = FeaturePatch::new(Some("A"), Some("new"), None, None).unwrap();
        let updated = store.update(a.id, &to_a).await.unwrap();
        assert_eq!(updated.description, "new");
        assert!(updated.updated_at > a.updated_at);
        assert_eq!(updated.created_at, a.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let store = MemoryStore::new();
        let patch = FeaturePatch::new(Some("x"), None, None, None).unwrap();
        assert!(matches!(
            store.update(9, &patch).await,
            Err(DbError::NotFound { id: 9, .. })
        ));
        assert!(matches!(
            FeatureStore::delete(&store, 9).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            SubmissionStore::delete(&store, 9).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn submissions_list_newest_first_and_count_ignores_page() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            SubmissionStore::create(&store, &submission(name)).await.unwrap();
        }

        let filter = SubmissionFilter::default();
        let first = SubmissionStore::list(&store, &filter, &page(1, 2)).await.unwrap();
        let names: Vec<_> = first.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);

        let second = SubmissionStore::list(&store, &filter, &page(2, 2)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(SubmissionStore::count(&store, &filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn public_list_is_oldest_first_and_seeding_is_idempotent() {
        let store = MemoryStore::new();
        assert!(store.insert_if_absent(&feature("one")).await.unwrap());
        assert!(store.insert_if_absent(&feature("two")).await.unwrap());
        assert!(!store.insert_if_absent(&feature("one")).await.unwrap());

        let titles: Vec<_> = store
            .list_public()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn clear_removes_all_submissions() {
        let store = MemoryStore::new();
        SubmissionStore::create(&store, &submission("a")).await.unwrap();
        SubmissionStore::create(&store, &submission("b")).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 2);
        assert_eq!(
            SubmissionStore::count(&store, &SubmissionFilter::default())
                .await
                .unwrap(),
            0
        );
    }
}
