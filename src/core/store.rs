//! Filtering, searching, sorting and paging over loaded records

use crate::core::entity::Data;
use crate::core::error::DashResult;
use crate::core::query::{Direction, GetQuery, Page, PaginationMeta};
use std::cmp::Ordering;

/// Trait for stores that evaluate list queries in process
///
/// Every step has a default implementation driven by `Data::field_value`,
/// so an implementor only supplies `list_all`.
pub trait QueryableStore<T: Data>: Send + Sync {
    /// Every stored record, in storage order
    fn list_all(&self) -> DashResult<Vec<T>>;

    /// Keep records matching every `(field, value)` condition.
    ///
    /// A condition on a field the entity does not have matches nothing.
    fn apply_conditions(&self, data: Vec<T>, conditions: &[(&str, String)]) -> Vec<T> {
        data.into_iter()
            .filter(|item| {
                conditions.iter().all(|(field, expected)| {
                    item.field_value(field)
                        .is_some_and(|value| value.matches_text(expected))
                })
            })
            .collect()
    }

    /// Keep records where any searched field contains `term`, ignoring case.
    ///
    /// `keys` defaults to the entity's indexed fields. A blank term keeps all.
    fn apply_search(&self, data: Vec<T>, term: &str, keys: &[String]) -> Vec<T> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return data;
        }

        let keys: Vec<&str> = if keys.is_empty() {
            T::indexed_fields().to_vec()
        } else {
            keys.iter().map(String::as_str).collect()
        };

        data.into_iter()
            .filter(|item| {
                keys.iter().any(|key| {
                    item.field_value(key)
                        .and_then(|v| v.search_text())
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            })
            .collect()
    }

    /// Stable sort by a field; incomparable values keep their order
    fn apply_sort(&self, mut data: Vec<T>, field: &str, direction: Direction) -> Vec<T> {
        data.sort_by(|a, b| {
            let ordering = match (a.field_value(field), b.field_value(field)) {
                (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            };
            match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
        data
    }

    /// Run a full list query: conditions, search, sort, then offset/limit
    fn query(&self, query: &GetQuery, conditions: &[(&str, String)]) -> DashResult<Page<T>> {
        let mut data = self.apply_conditions(self.list_all()?, conditions);

        if let Some(term) = &query.search_term {
            data = self.apply_search(data, term, &query.search_term_keys);
        }
        if let Some(sort) = query.sort() {
            data = self.apply_sort(data, &sort.field, sort.direction);
        }

        let total = data.len();
        let (limit, offset) = (query.limit(), query.offset());
        let page = data.into_iter().skip(offset).take(limit).collect();

        Ok(Page {
            data: page,
            pagination: PaginationMeta::new(limit, offset, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Influencer, InfluencerDraft};

    struct Fixed(Vec<Influencer>);

    impl QueryableStore<Influencer> for Fixed {
        fn list_all(&self) -> DashResult<Vec<Influencer>> {
            Ok(self.0.clone())
        }
    }

    fn influencer(name: &str, location: &str, followers: u64) -> Influencer {
        Influencer::from_draft(InfluencerDraft {
            name: name.into(),
            location: location.into(),
            language: "EN".into(),
            genre: "Pop".into(),
            followers,
            social_media_links: "http://x".into(),
        })
        .unwrap()
    }

    fn store() -> Fixed {
        Fixed(vec![
            influencer("zoe", "Berlin", 10),
            influencer("Adam", "Lisbon", 30),
            influencer("mia", "Berlin", 20),
        ])
    }

    fn names(data: &[Influencer]) -> Vec<&str> {
        data.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_sort_strings_ignores_case() {
        let store = store();
        let sorted = store.apply_sort(store.list_all().unwrap(), "name", Direction::Asc);
        assert_eq!(names(&sorted), vec!["Adam", "mia", "zoe"]);
    }

    #[test]
    fn test_sort_unknown_field_keeps_order() {
        let store = store();
        let sorted = store.apply_sort(store.list_all().unwrap(), "nope", Direction::Desc);
        assert_eq!(names(&sorted), vec!["zoe", "Adam", "mia"]);
    }

    #[test]
    fn test_blank_search_keeps_everything() {
        let store = store();
        assert_eq!(store.apply_search(store.list_all().unwrap(), "  ", &[]).len(), 3);
    }

    #[test]
    fn test_query_combines_steps() {
        let query = GetQuery {
            search_term: Some("berlin".into()),
            order: Some("followers:desc".into()),
            limit: Some(1),
            ..Default::default()
        };
        let page = store().query(&query, &[]).unwrap();
        assert_eq!(names(&page.data), vec!["mia"]);
        assert_eq!(page.pagination.total_count, 2);
        assert!(page.pagination.has_next);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let query = GetQuery {
            offset: Some(10),
            ..Default::default()
        };
        let page = store().query(&query, &[]).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_count, 3);
        assert!(page.pagination.has_prev);
    }
}
