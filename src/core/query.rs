//! Query parameters, filter contracts and pagination

use crate::core::entity::Data;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Default page size when the caller gives none
pub const DEFAULT_LIMIT: usize = 20;

/// Largest page a single list request may return
pub const MAX_LIMIT: usize = 100;

/// Shared pagination, sort and relation options for every list request
///
/// # Example
/// ```
/// use influencer_dash::core::query::GetQuery;
///
/// let query = GetQuery {
///     limit: Some(5),
///     order: Some("followers:desc".to_string()),
///     relations: vec!["credit_transaction.count".to_string()],
///     ..Default::default()
/// };
/// assert_eq!(query.limit(), 5);
/// assert_eq!(query.offset(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetQuery {
    /// Number of items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Number of items to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    /// Sort expression: `field`, `field:asc` or `field:desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Relations to load eagerly; `<relation>.count` loads only the aggregate count
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<String>,

    /// Case-insensitive free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,

    /// Fields the search term applies to; the entity's indexed fields when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_term_keys: Vec<String>,
}

impl GetQuery {
    /// Get limit, clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Parsed sort order, if any
    pub fn sort(&self) -> Option<SortOrder> {
        self.order.as_deref().and_then(SortOrder::parse)
    }

    /// Parsed relation requests, in the order given
    pub fn relation_requests(&self) -> Vec<RelationRequest> {
        self.relations
            .iter()
            .map(|r| RelationRequest::parse(r))
            .collect()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// A parsed `field:direction` sort expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

impl SortOrder {
    /// Parse `field`, `field:asc` or `field:desc`.
    ///
    /// Returns `None` for an empty field or an unknown direction.
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, "asc")) => (field, Direction::Asc),
            Some((field, "desc")) => (field, Direction::Desc),
            Some(_) => return None,
            None => (expr, Direction::Asc),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// A requested relation: the related records, or only their count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRequest {
    pub name: String,
    pub count_only: bool,
}

impl RelationRequest {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix(".count") {
            Some(name) => Self {
                name: name.to_string(),
                count_only: true,
            },
            None => Self {
                name: raw.to_string(),
                count_only: false,
            },
        }
    }
}

/// Equality filters accepted by a "list entities" request.
///
/// Implementors are plain structs of optional fields; `FIELDS` names them and
/// must be a subset of the entity's schema fields.
pub trait FilterContract: Default + Clone + Serialize + DeserializeOwned + Send + Sync {
    /// The entity this filter narrows
    type Entity: Data;

    /// Names of every filterable field
    const FIELDS: &'static [&'static str];

    /// Active conditions as `(field, expected value)` pairs
    fn conditions(&self) -> Vec<(&'static str, String)>;

    /// Filter fields absent from the entity schema; empty for a valid contract
    fn orphan_fields() -> Vec<&'static str> {
        let schema = <Self::Entity as crate::core::entity::Entity>::schema();
        Self::FIELDS
            .iter()
            .copied()
            .filter(|f| !schema.has_field(f))
            .collect()
    }
}

/// A complete list request: the shared base query plus entity filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery<F> {
    #[serde(flatten)]
    pub base: GetQuery,

    #[serde(flatten)]
    pub filter: F,
}

impl<F: FilterContract> ListQuery<F> {
    pub fn new(base: GetQuery, filter: F) -> Self {
        Self { base, filter }
    }

    /// A query with only filters set
    pub fn filtered(filter: F) -> Self {
        Self {
            base: GetQuery::default(),
            filter,
        }
    }
}

/// A page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The records on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub limit: usize,
    pub offset: usize,

    /// Total number of items after filters
    pub total_count: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(limit: usize, offset: usize, total_count: usize) -> Self {
        Self {
            limit,
            offset,
            total_count,
            has_next: offset.saturating_add(limit) < total_count,
            has_prev: offset > 0,
        }
    }
}
