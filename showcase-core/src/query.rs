//! Filter/sort/paginate layer shared by every listable record type.
//!
//! A list request is a sparse exact-match filter plus [`ListOptions`]. The
//! same types drive both the in-memory evaluator here ([`select`] and
//! [`count`]) and the SQL builder in the server crate, so the two stores
//! agree on ordering and slicing.
//!
//! Ordering rules:
//! - an explicit sort field wins, with ties broken by insertion order
//!   (ascending id)
//! - otherwise the record type's [`Record::default_sort`] applies; `None`
//!   means insertion order
//!
//! Unknown sort field names are ignored and fall back to the default order.
//! Sort fields are a closed enum per record type, so no caller-provided text
//! ever becomes a column name.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;
use crate::pagination::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Sort direction (`asc` / `desc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Apply this direction to an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A sortable column of a record type.
pub trait SortField: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Parse the wire name (camelCase, as in the JSON output).
    fn parse(name: &str) -> Option<Self>;

    /// Wire name of the field.
    fn name(self) -> &'static str;

    /// Column name in the relational store.
    fn column(self) -> &'static str;
}

/// Requested ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// One exact-match condition, expressed against a store column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    pub column: &'static str,
    pub value: String,
}

/// Sparse exact-match filter over a record type.
pub trait RecordFilter<R> {
    /// Whether `record` satisfies every present constraint.
    fn matches(&self, record: &R) -> bool;

    /// The present constraints, for building a `WHERE` clause.
    fn constraints(&self) -> Vec<FieldConstraint>;
}

/// A record type that can be listed through this layer.
pub trait Record: Clone {
    type Field: SortField;
    type Filter: RecordFilter<Self> + Default;

    fn id(&self) -> i64;

    /// Ascending comparison on a single field.
    fn compare_field(&self, other: &Self, field: Self::Field) -> Ordering;

    /// Ordering applied when the caller gives no sort field.
    fn default_sort() -> Option<SortSpec<Self::Field>>;
}

/// Validated list options for one record type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListOptions<F> {
    pub pagination: Pagination,
    pub sort: Option<SortSpec<F>>,
}

impl<F> Default for ListOptions<F> {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            sort: None,
        }
    }
}

impl<F: SortField> ListOptions<F> {
    /// The sort to actually apply for record type `R`.
    pub fn effective_sort<R>(&self) -> Option<SortSpec<F>>
    where
        R: Record<Field = F>,
    {
        self.sort.or_else(R::default_sort)
    }
}

/// Raw list query parameters as they arrive on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Field name, optionally suffixed with `:asc` / `:desc`
    pub sort_by: Option<String>,
    pub sort_type: Option<SortDirection>,
}

impl ListParams {
    /// Validate into typed options for field type `F`.
    ///
    /// `max_limit` caps the page size for record types that have one.
    pub fn into_options<F: SortField>(
        self,
        max_limit: Option<u32>,
    ) -> Result<ListOptions<F>, ValidationError> {
        let pagination = Pagination::bounded(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.limit.unwrap_or(DEFAULT_LIMIT),
            max_limit,
        )?;

        let sort = self
            .sort_by
            .as_deref()
            .and_then(|raw| parse_sort(raw, self.sort_type.unwrap_or_default()));

        Ok(ListOptions { pagination, sort })
    }
}

/// Parse `field` or `field:direction`. Unknown names yield `None`.
fn parse_sort<F: SortField>(raw: &str, fallback: SortDirection) -> Option<SortSpec<F>> {
    let (name, direction) = match raw.split_once(':') {
        Some((name, dir)) => (name, SortDirection::parse(dir).unwrap_or(fallback)),
        None => (raw, fallback),
    };

    match F::parse(name.trim()) {
        Some(field) => Some(SortSpec::new(field, direction)),
        None => {
            tracing::debug!(sort_by = %raw, "ignoring unknown sort field");
            None
        }
    }
}

/// Return one page of `records` matching `filter`.
///
/// `records` must be in insertion order; the sort is stable so ties keep it.
pub fn select<R: Record>(
    records: &[R],
    filter: &R::Filter,
    options: &ListOptions<R::Field>,
) -> Vec<R> {
    let mut matching: Vec<&R> = records.iter().filter(|r| filter.matches(r)).collect();

    if let Some(sort) = options.effective_sort::<R>() {
        matching.sort_by(|a, b| sort.direction.apply(a.compare_field(b, sort.field)));
    }

    let offset = usize::try_from(options.pagination.offset()).unwrap_or(usize::MAX);
    matching
        .into_iter()
        .skip(offset)
        .take(options.pagination.limit() as usize)
        .cloned()
        .collect()
}

/// Count `records` matching `filter`, ignoring pagination.
pub fn count<R: Record>(records: &[R], filter: &R::Filter) -> u64 {
    records.iter().filter(|r| filter.matches(r)).count() as u64
}
