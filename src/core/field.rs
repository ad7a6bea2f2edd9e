//! Field values and static entity schemas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value used for filtering and searching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare against a filter value given in its textual form.
    ///
    /// Filters arrive from query strings, so `"1000"` matches `Integer(1000)`
    /// and a hyphenated UUID string matches `Uuid(..)`.
    pub fn matches_text(&self, expected: &str) -> bool {
        match self {
            FieldValue::String(s) => s == expected,
            FieldValue::Integer(i) => expected.parse::<i64>().is_ok_and(|e| e == *i),
            FieldValue::Float(f) => expected.parse::<f64>().is_ok_and(|e| e == *f),
            FieldValue::Uuid(u) => Uuid::parse_str(expected).is_ok_and(|e| e == *u),
            FieldValue::DateTime(d) => {
                DateTime::parse_from_rfc3339(expected).is_ok_and(|e| e == *d)
            }
            FieldValue::Null => false,
        }
    }

    /// Text used for free-text search; non-textual values are not searchable
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            _ => None,
        }
    }

    /// Order two values of the same kind; nulls sort first.
    ///
    /// Integers and floats compare numerically. Mismatched kinds have no order.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            (FieldValue::Null, _) => Some(Ordering::Less),
            (_, FieldValue::Null) => Some(Ordering::Greater),
            (FieldValue::String(a), FieldValue::String(b)) => {
                Some(a.to_lowercase().cmp(&b.to_lowercase()))
            }
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Counts beyond `i64::MAX` become `Float`, which keeps their numeric order
impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Float(value as f64),
        }
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Semantic type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Opaque unique identifier
    Id,
    Text,
    Integer,
    Number,
    /// Identifier of a record of another entity
    Reference(&'static str),
    Timestamp,
}

/// Declaration of a single entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Must be supplied by the client on create
    pub required: bool,
    /// Assigned by the persistence layer, never taken from the client
    pub system: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            system: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            system: false,
        }
    }

    pub const fn system(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            system: true,
        }
    }
}

/// Cardinality of a relation seen from the owning entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// The owning record holds the foreign key
    BelongsTo,
    /// Other records hold a foreign key to the owning record
    HasMany,
}

/// Declaration of a nested relation field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationSpec {
    /// Wire name of the nested field (e.g. "credit_transaction")
    pub name: &'static str,
    /// Entity key of the related records
    pub target: &'static str,
    pub cardinality: Cardinality,
    /// Foreign key field, on the owner for `BelongsTo`, on the target for `HasMany`
    pub foreign_key: &'static str,
}

impl RelationSpec {
    /// Whether `_count.<name>` is exposed for this relation
    pub fn is_countable(&self) -> bool {
        self.cardinality == Cardinality::HasMany
    }
}

/// Static shape of an entity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySchema {
    /// Canonical singular entity key (e.g. "credit_transaction")
    pub entity: &'static str,
    /// Plural URL segment (e.g. "credit-transactions")
    pub route: &'static str,
    pub fields: &'static [FieldSpec],
    pub relations: &'static [RelationSpec],
}

impl EntitySchema {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether the schema declares a field
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Look up a relation by name
    pub fn relation(&self, name: &str) -> Option<&RelationSpec> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Field names the client may write
    pub fn mutable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| !f.system).map(|f| f.name)
    }
}
