//! Route-to-entity resolution
//!
//! Dashboard pages live under plural, hyphenated URL segments
//! (`/credit-transactions/edit/{id}`) while access checks and relation
//! lookups use the canonical entity key (`credit_transaction`). The mapping
//! is a process-wide table built once on first use.

use crate::core::error::{DashError, DashResult};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Segment -> entity key
static ROUTE_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("businesses", "business"),
        ("credit-transactions", "credit_transaction"),
        ("influencers", "influencer"),
        ("users", "user"),
    ])
});

/// Resolve a URL path segment to its entity key.
///
/// Segments without a mapping come back unchanged.
///
/// ```
/// use influencer_dash::routes::convert_route_to_entity;
///
/// assert_eq!(convert_route_to_entity("credit-transactions"), "credit_transaction");
/// assert_eq!(convert_route_to_entity("unknown-resource"), "unknown-resource");
/// ```
pub fn convert_route_to_entity(segment: &str) -> &str {
    ROUTE_TABLE.get(segment).copied().unwrap_or(segment)
}

/// Resolve a segment, failing with `UnmappedRoute` when it has no mapping
pub fn resolve_route_strict(segment: &str) -> DashResult<&'static str> {
    ROUTE_TABLE
        .get(segment)
        .copied()
        .ok_or_else(|| DashError::UnmappedRoute {
            segment: segment.to_string(),
        })
}

/// Every mapped `(segment, entity)` pair, sorted by segment
pub fn mapped_routes() -> Vec<(&'static str, &'static str)> {
    let mut routes: Vec<_> = ROUTE_TABLE.iter().map(|(s, e)| (*s, *e)).collect();
    routes.sort_unstable();
    routes
}
