//! PostgreSQL store implementations

mod features;
mod submissions;

pub use features::PgFeatureStore;
pub use submissions::PgSubmissionStore;

use super::DbError;

/// Map a unique violation to `Conflict`, anything else to `Sqlx`.
pub(crate) fn conflict_or_sqlx(
    err: sqlx::Error,
    resource: &'static str,
    field: &'static str,
    value: &str,
) -> DbError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Conflict {
            resource,
            field,
            value: value.to_owned(),
        },
        _ => DbError::Sqlx(err),
    }
}
