//! Contact form submission repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use showcase_core::models::{NewSubmission, Submission, SubmissionField, SubmissionFilter};
use showcase_core::ListOptions;

use crate::db::query::{count_matching, select_page};
use crate::db::{DbError, SubmissionStore, SUBMISSION};

const COLUMNS: &str = "id, name, email, subject, message, created_at";

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: i64,
    name: String,
    email: String,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Submission store backed by the `contact_forms` table
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, input: &NewSubmission) -> Result<Submission, DbError> {
        let row: SubmissionRow = sqlx::query_as(&format!(
            "INSERT INTO contact_forms (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(input.name())
        .bind(input.email())
        .bind(input.subject())
        .bind(input.message())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Submission>, DbError> {
        let row: Option<SubmissionRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM contact_forms WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Submission::from))
    }

    async fn list(
        &self,
        filter: &SubmissionFilter,
        options: &ListOptions<SubmissionField>,
    ) -> Result<Vec<Submission>, DbError> {
        let mut builder = select_page::<Submission>(COLUMNS, "contact_forms", filter, options);
        let rows: Vec<SubmissionRow> = builder
            .build_query_as::<SubmissionRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }

    async fn count(&self, filter: &SubmissionFilter) -> Result<u64, DbError> {
        let mut builder = count_matching::<Submission>("contact_forms", filter);
        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM contact_forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(SUBMISSION, id));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM contact_forms")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, schema};
    use showcase_core::{Pagination, SortDirection, SortSpec};

    // Run with: DATABASE_URL=postgres://... cargo test -p showcase-server -- --ignored

    async fn store() -> PgSubmissionStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::ensure(&pool).await.expect("schema failed");
        PgSubmissionStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_get_delete() {
        let store = store().await;
        let input = NewSubmission::new("Pg Test", "pg@example.com", "Hello", "Body").unwrap();

        let created = store.create(&input).await.unwrap();
        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());
        let err = store.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn newest_first_by_default() {
        let store = store().await;
        let email = format!(
            "order-{}@example.com",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let first = store
            .create(&NewSubmission::new("A", &email, "S", "M").unwrap())
            .await
            .unwrap();
        let second = store
            .create(&NewSubmission::new("B", &email, "S", "M").unwrap())
            .await
            .unwrap();

        let filter = SubmissionFilter {
            email: Some(email.clone()),
            ..Default::default()
        };
        let options = ListOptions {
            pagination: Pagination::new(1, 10).unwrap(),
            sort: None,
        };
        let ids: Vec<_> = store
            .list(&filter, &options)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let options = ListOptions {
            pagination: Pagination::new(1, 10).unwrap(),
            sort: Some(SortSpec::new(SubmissionField::Name, SortDirection::Asc)),
        };
        let ids: Vec<_> = store
            .list(&filter, &options)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);

        store.delete(first.id).await.unwrap();
        store.delete(second.id).await.unwrap();
    }
}
