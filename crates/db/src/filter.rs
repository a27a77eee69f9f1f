//! Dynamic WHERE-clause construction for project listing.
//!
//! A [`ProjectFilter`] is either a free-text search over description names or
//! a conjunction of structured predicates. The two never mix: when a search
//! value is present the structured fields are not consulted.
//!
//! Each [`Predicate`] carries its own bind value, so rendering the SQL and
//! binding the parameters walk the same list in the same order.

use std::ops::Bound;

use projects_core::error::CoreError;
use projects_core::project_type::ProjectType;
use projects_core::text_match::contains_pattern;
use projects_core::types::DbId;
use projects_core::unit_tier::{unit_range, UnitTier};
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

use crate::models::project::ProjectListParams;
use crate::models::status::ProjectStatus;

/// Typed bind value for a dynamically-built predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    SmallInt(i16),
    Double(f64),
    Text(String),
    BigIntArray(Vec<DbId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Eq,
    EqIgnoreCase,
    Like,
    AnyOf,
    Gte,
    Gt,
    Lte,
    Lt,
    /// Correlated `EXISTS` over `projects_desc.name`.
    DescNameLike,
}

/// One named condition on the `projects p` row plus its parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub name: &'static str,
    column: &'static str,
    comparison: Comparison,
    pub value: BindValue,
}

impl Predicate {
    fn new(
        name: &'static str,
        column: &'static str,
        comparison: Comparison,
        value: BindValue,
    ) -> Self {
        Self {
            name,
            column,
            comparison,
            value,
        }
    }

    /// Render this predicate using `$idx` as its placeholder.
    fn render(&self, idx: usize) -> String {
        let col = self.column;
        match self.comparison {
            Comparison::Eq => format!("{col} = ${idx}"),
            Comparison::EqIgnoreCase => format!("LOWER({col}) = LOWER(${idx})"),
            Comparison::Like => format!("{col} LIKE ${idx}"),
            Comparison::AnyOf => format!("{col} = ANY(${idx})"),
            Comparison::Gte => format!("{col} >= ${idx}"),
            Comparison::Gt => format!("{col} > ${idx}"),
            Comparison::Lte => format!("{col} <= ${idx}"),
            Comparison::Lt => format!("{col} < ${idx}"),
            Comparison::DescNameLike => format!(
                "EXISTS (SELECT 1 FROM projects_desc d \
                 WHERE d.project_id = p.id AND d.name LIKE ${idx})"
            ),
        }
    }
}

/// The filter applied to one listing call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectFilter {
    /// Case-sensitive substring match on any description name.
    Search(Predicate),
    /// All predicates must hold. Empty means "every project".
    Structured(Vec<Predicate>),
}

/// SQL fragment produced by [`ProjectFilter::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFilter {
    /// Empty when no predicates apply, otherwise starts with `WHERE `.
    pub where_clause: String,
    /// Index of the first placeholder available after the filter's own.
    pub next_idx: usize,
}

impl ProjectFilter {
    /// Build the filter for a listing request.
    ///
    /// Fails only when `status` is set to a value outside the status set.
    pub fn from_params(params: &ProjectListParams) -> Result<Self, CoreError> {
        if let Some(search) = non_blank(params.search.as_deref()) {
            return Ok(Self::Search(Predicate::new(
                "search",
                "projects_desc.name",
                Comparison::DescNameLike,
                BindValue::Text(contains_pattern(search)),
            )));
        }

        let mut predicates = Vec::new();

        if let Some(status_id) = params.status.filter(|s| *s != 0) {
            let status = ProjectStatus::from_id(status_id).ok_or_else(|| {
                CoreError::Validation(format!("unknown project status {status_id}"))
            })?;
            predicates.push(Predicate::new(
                "status",
                "status",
                Comparison::Eq,
                BindValue::SmallInt(status.id()),
            ));
        }

        if !params.ids.is_empty() {
            predicates.push(Predicate::new(
                "ids",
                "id",
                Comparison::AnyOf,
                BindValue::BigIntArray(params.ids.clone()),
            ));
        }

        if let Some(owner_id) = non_blank(params.owner_id.as_deref()) {
            predicates.push(Predicate::new(
                "owner_id",
                "owner_id",
                Comparison::Eq,
                BindValue::Text(owner_id.to_string()),
            ));
        }

        if let Some(country_id) = non_blank(params.country_id.as_deref()) {
            predicates.push(Predicate::new(
                "country_id",
                "country_id",
                Comparison::EqIgnoreCase,
                BindValue::Text(country_id.to_string()),
            ));
        }

        if let Some(type_id) = params.project_type.filter(|t| *t != 0) {
            predicates.push(Predicate::new(
                "type",
                "type",
                Comparison::Eq,
                BindValue::SmallInt(type_id),
            ));
            predicates.extend(unit_tier_predicates(type_id, params.unit));
        }

        if let Some(location) = non_blank(params.location.as_deref()) {
            predicates.push(Predicate::new(
                "location_name",
                "location_name",
                Comparison::Like,
                BindValue::Text(contains_pattern(location)),
            ));
        }

        Ok(Self::Structured(predicates))
    }

    pub fn predicates(&self) -> &[Predicate] {
        match self {
            Self::Search(p) => std::slice::from_ref(p),
            Self::Structured(ps) => ps,
        }
    }

    /// Names of the active predicates, in bind order.
    pub fn names(&self) -> Vec<&'static str> {
        self.predicates().iter().map(|p| p.name).collect()
    }

    /// Render the WHERE clause with placeholders starting at `$1`.
    pub fn render(&self) -> RenderedFilter {
        let conditions: Vec<String> = self
            .predicates()
            .iter()
            .enumerate()
            .map(|(i, p)| p.render(i + 1))
            .collect();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        RenderedFilter {
            where_clause,
            next_idx: conditions.len() + 1,
        }
    }

    /// Bind the predicate values to a `QueryAs`, in render order.
    pub fn bind_query_as<'q, O: Send + Unpin>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for p in self.predicates() {
            q = match &p.value {
                BindValue::SmallInt(v) => q.bind(*v),
                BindValue::Double(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::BigIntArray(v) => q.bind(v.as_slice()),
            };
        }
        q
    }

    /// Bind the predicate values to a `QueryScalar`, in render order.
    pub fn bind_query_scalar<'q, O: Send + Unpin>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for p in self.predicates() {
            q = match &p.value {
                BindValue::SmallInt(v) => q.bind(*v),
                BindValue::Double(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::BigIntArray(v) => q.bind(v.as_slice()),
            };
        }
        q
    }
}

/// Range predicates on `unit` for a known type and a selected tier.
///
/// Unknown types, types without a threshold table, and tier selectors
/// outside `1..=3` contribute nothing.
fn unit_tier_predicates(type_id: i16, selector: Option<i16>) -> Vec<Predicate> {
    let range = ProjectType::from_id(type_id)
        .zip(selector.and_then(UnitTier::from_selector))
        .and_then(|(ty, tier)| unit_range(ty, tier));

    let Some(range) = range else {
        return Vec::new();
    };

    let mut predicates = Vec::with_capacity(2);
    match range.lower {
        Bound::Included(v) => predicates.push(Predicate::new(
            "unit_min",
            "unit",
            Comparison::Gte,
            BindValue::Double(v),
        )),
        Bound::Excluded(v) => predicates.push(Predicate::new(
            "unit_min",
            "unit",
            Comparison::Gt,
            BindValue::Double(v),
        )),
        Bound::Unbounded => {}
    }
    match range.upper {
        Bound::Included(v) => predicates.push(Predicate::new(
            "unit_max",
            "unit",
            Comparison::Lte,
            BindValue::Double(v),
        )),
        Bound::Excluded(v) => predicates.push(Predicate::new(
            "unit_max",
            "unit",
            Comparison::Lt,
            BindValue::Double(v),
        )),
        Bound::Unbounded => {}
    }
    predicates
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
