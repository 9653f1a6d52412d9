//! Idempotent schema bootstrap
//!
//! Runs `CREATE ... IF NOT EXISTS` on every startup. There is no migration
//! history; changing a column means changing it by hand.

use sqlx::PgPool;

use super::DbError;

/// Create tables and indexes if they are missing.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("ensuring database schema");

    // title uniqueness is enforced here, not in handlers
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS features (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_forms (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contact_forms_created ON contact_forms(created_at DESC)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contact_forms_email ON contact_forms(email)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_features_created ON features(created_at)")
        .execute(pool)
        .await?;

    tracing::info!("database schema ready");
    Ok(())
}
