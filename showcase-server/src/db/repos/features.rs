//! Feature repository
//!
//! - create: plain INSERT, unique index on title turns duplicates into `Conflict`
//! - update: single UPDATE with COALESCE so absent fields keep their value
//! - list/count: built from the shared filter and sort types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use showcase_core::models::{Feature, FeatureField, FeatureFilter, FeaturePatch, NewFeature};
use showcase_core::ListOptions;

use super::conflict_or_sqlx;
use crate::db::query::{count_matching, select_page};
use crate::db::{DbError, FeatureStore, FEATURE};

const COLUMNS: &str = "id, title, description, icon, color, created_at, updated_at";

#[derive(Debug, FromRow)]
struct FeatureRow {
    id: i64,
    title: String,
    description: String,
    icon: String,
    color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FeatureRow> for Feature {
    fn from(row: FeatureRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            icon: row.icon,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Feature store backed by the `features` table
#[derive(Clone)]
pub struct PgFeatureStore {
    pool: PgPool,
}

impl PgFeatureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureStore for PgFeatureStore {
    async fn create(&self, input: &NewFeature) -> Result<Feature, DbError> {
        let row: FeatureRow = sqlx::query_as(&format!(
            "INSERT INTO features (title, description, icon, color) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(input.title())
        .bind(input.description())
        .bind(input.icon())
        .bind(input.color())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_sqlx(e, FEATURE, "title", input.title()))?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Feature>, DbError> {
        let row: Option<FeatureRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM features WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Feature::from))
    }

    async fn list(
        &self,
        filter: &FeatureFilter,
        options: &ListOptions<FeatureField>,
    ) -> Result<Vec<Feature>, DbError> {
        let mut builder = select_page::<Feature>(COLUMNS, "features", filter, options);
        let rows: Vec<FeatureRow> = builder
            .build_query_as::<FeatureRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Feature::from).collect())
    }

    async fn count(&self, filter: &FeatureFilter) -> Result<u64, DbError> {
        let mut builder = count_matching::<Feature>("features", filter);
        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn update(&self, id: i64, patch: &FeaturePatch) -> Result<Feature, DbError> {
        let row: Option<FeatureRow> = sqlx::query_as(&format!(
            r#"
            UPDATE features SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                icon = COALESCE($4, icon),
                color = COALESCE($5, color),
                updated_at = clock_timestamp()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title())
        .bind(patch.description())
        .bind(patch.icon())
        .bind(patch.color())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or_sqlx(e, FEATURE, "title", patch.title().unwrap_or_default()))?;

        row.map(Feature::from)
            .ok_or_else(|| DbError::not_found(FEATURE, id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(FEATURE, id));
        }
        Ok(())
    }

    async fn list_public(&self) -> Result<Vec<Feature>, DbError> {
        let rows: Vec<FeatureRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM features ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Feature::from).collect())
    }

    async fn insert_if_absent(&self, input: &NewFeature) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO features (title, description, icon, color) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (title) DO NOTHING",
        )
        .bind(input.title())
        .bind(input.description())
        .bind(input.icon())
        .bind(input.color())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
