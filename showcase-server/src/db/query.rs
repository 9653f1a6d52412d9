//! SQL rendering of list options
//!
//! Turns a record filter and [`ListOptions`] into `WHERE`, `ORDER BY` and
//! `LIMIT/OFFSET` clauses. Filter values are always bound parameters; column
//! names come only from the closed `SortField` enums.
//!
//! Every ordering ends in `id ASC` so ties come back in insertion order, the
//! same order the in-memory store produces.

use sqlx::{Postgres, QueryBuilder};

use showcase_core::query::{FieldConstraint, Record, RecordFilter, SortField};
use showcase_core::ListOptions;

/// Append `WHERE a = $1 AND b = $2 ...` for every present constraint.
pub(crate) fn push_where(builder: &mut QueryBuilder<'_, Postgres>, constraints: Vec<FieldConstraint>) {
    for (i, constraint) in constraints.into_iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(constraint.column);
        builder.push(" = ");
        builder.push_bind(constraint.value);
    }
}

/// Append `ORDER BY` for record type `R`.
pub(crate) fn push_order<R: Record>(
    builder: &mut QueryBuilder<'_, Postgres>,
    options: &ListOptions<R::Field>,
) {
    match options.effective_sort::<R>() {
        Some(sort) if sort.field.column() != "id" => {
            builder.push(" ORDER BY ");
            builder.push(sort.field.column());
            builder.push(" ");
            builder.push(sort.direction.as_sql());
            builder.push(", id ASC");
        }
        Some(sort) => {
            builder.push(" ORDER BY id ");
            builder.push(sort.direction.as_sql());
        }
        None => {
            builder.push(" ORDER BY id ASC");
        }
    }
}

/// Append `LIMIT $n OFFSET $m`.
pub(crate) fn push_page<F>(builder: &mut QueryBuilder<'_, Postgres>, options: &ListOptions<F>) {
    let limit = i64::from(options.pagination.limit());
    let offset = i64::try_from(options.pagination.offset()).unwrap_or(i64::MAX);
    builder.push(" LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
}

/// Full `SELECT` for one page of `R` from `table`.
pub(crate) fn select_page<'a, R: Record>(
    columns: &str,
    table: &str,
    filter: &R::Filter,
    options: &ListOptions<R::Field>,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", columns, table));
    push_where(&mut builder, filter.constraints());
    push_order::<R>(&mut builder, options);
    push_page(&mut builder, options);
    builder
}

/// `SELECT COUNT(*)` of `R` rows in `table` matching `filter`.
pub(crate) fn count_matching<'a, R: Record>(
    table: &str,
    filter: &R::Filter,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
    push_where(&mut builder, filter.constraints());
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::models::{Feature, FeatureField, FeatureFilter, Submission, SubmissionFilter};
    use showcase_core::{Pagination, SortDirection, SortSpec, SubmissionField};

    fn options<F>(page: u32, limit: u32, sort: Option<SortSpec<F>>) -> ListOptions<F> {
        ListOptions {
            pagination: Pagination::new(page, limit).unwrap(),
            sort,
        }
    }

    #[test]
    fn feature_default_is_insertion_order() {
        let builder = select_page::<Feature>(
            "id, title",
            "features",
            &FeatureFilter::default(),
            &options(1, 10, None),
        );
        assert_eq!(
            builder.sql(),
            "SELECT id, title FROM features ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn submission_default_is_newest_first() {
        let builder = select_page::<Submission>(
            "id",
            "contact_forms",
            &SubmissionFilter::default(),
            &options(2, 5, None),
        );
        assert_eq!(
            builder.sql(),
            "SELECT id FROM contact_forms ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn filters_are_bound_not_inlined() {
        let filter = SubmissionFilter {
            name: Some("x' OR 1=1 --".into()),
            email: None,
            subject: Some("Hi".into()),
        };
        let sort = SortSpec::new(SubmissionField::Name, SortDirection::Asc);
        let builder = select_page::<Submission>("id", "contact_forms", &filter, &options(1, 10, Some(sort)));
        assert_eq!(
            builder.sql(),
            "SELECT id FROM contact_forms WHERE name = $1 AND subject = $2 \
             ORDER BY name ASC, id ASC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn explicit_id_sort_has_no_tie_break() {
        let sort = SortSpec::new(FeatureField::Id, SortDirection::Desc);
        let builder = select_page::<Feature>(
            "id",
            "features",
            &FeatureFilter::default(),
            &options(1, 10, Some(sort)),
        );
        assert_eq!(
            builder.sql(),
            "SELECT id FROM features ORDER BY id DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn count_ignores_pagination() {
        let filter = FeatureFilter {
            title: Some("Secure".into()),
        };
        let builder = count_matching::<Feature>("features", &filter);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM features WHERE title = $1");
    }
}
