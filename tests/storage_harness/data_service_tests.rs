//! Macro-generated test suite for `DataService<Influencer>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<Influencer>` implementation against the full contract: CRUD,
//! equality conditions, search, sort, pagination, field lookups and
//! concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use influencer_dash::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Influencer>::new());
//! ```

/// Generate a full `DataService<Influencer>` conformance test suite.
///
/// `$factory` is re-evaluated for each test to ensure isolation. For the
/// concurrent access test the service must also be `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use influencer_dash::core::entity::{Data, Entity};
            use influencer_dash::core::error::DashError;
            use influencer_dash::core::query::GetQuery;
            use influencer_dash::core::service::DataService;
            use uuid::Uuid;

            async fn seeded() -> impl DataService<Influencer> + Clone {
                let service = $factory;
                for influencer in sample_batch() {
                    service.create(influencer).await.unwrap();
                }
                service
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let influencer = create_test_influencer("Alice", "Pop", "EN", 1200);
                let original_id = influencer.id;

                let created = service.create(influencer).await.unwrap();
                assert_eq!(created.id(), original_id);

                let retrieved = service.get(&original_id).await.unwrap();
                let retrieved = retrieved.expect("record should exist after create");
                assert_eq!(retrieved.name, "Alice");
                assert_eq!(retrieved.followers, 1200);
                assert_eq!(retrieved.created_at(), created.created_at());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let page = service.list(&GetQuery::default(), &[]).await.unwrap();
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.total_count, 0);
                assert!(!page.pagination.has_next);
            }

            #[tokio::test]
            async fn test_list_keeps_insertion_order() {
                let service = seeded().await;
                let page = service.list(&GetQuery::default(), &[]).await.unwrap();
                assert_names(&page.data, &["Alice", "Bruno", "Chen", "Dana", "Emil"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut influencer = service
                    .create(create_test_influencer("Alice", "Pop", "EN", 1))
                    .await
                    .unwrap();
                influencer.genre = "Soul".to_string();

                service.update(&influencer.id, influencer.clone()).await.unwrap();
                let stored = service.get(&influencer.id).await.unwrap().unwrap();
                assert_eq!(stored.genre, "Soul");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let influencer = create_test_influencer("Ghost", "Pop", "EN", 1);
                let result = service.update(&influencer.id, influencer.clone()).await;
                assert!(matches!(result, Err(DashError::NotFound { .. })));
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = seeded().await;
                let page = service.list(&GetQuery::default(), &[]).await.unwrap();
                let target = page.data[1].id;

                service.delete(&target).await.unwrap();
                assert!(service.get(&target).await.unwrap().is_none());
                let page = service.list(&GetQuery::default(), &[]).await.unwrap();
                assert_count(&page.data, 4);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                let result = service.delete(&Uuid::new_v4()).await;
                assert!(matches!(result, Err(DashError::NotFound { .. })));
            }

            // ==================================================================
            // Conditions, search, sort, pagination
            // ==================================================================

            #[tokio::test]
            async fn test_conditions_match_every_pair() {
                let service = seeded().await;
                let page = service
                    .list(
                        &GetQuery::default(),
                        &[("genre", "Pop".to_string()), ("language", "EN".to_string())],
                    )
                    .await
                    .unwrap();
                assert_names(&page.data, &["Alice"]);
            }

            #[tokio::test]
            async fn test_condition_on_integer_field() {
                let service = seeded().await;
                let page = service
                    .list(&GetQuery::default(), &[("followers", "300".to_string())])
                    .await
                    .unwrap();
                assert_names(&page.data, &["Dana"]);
            }

            #[tokio::test]
            async fn test_condition_on_unknown_field_matches_nothing() {
                let service = seeded().await;
                let page = service
                    .list(&GetQuery::default(), &[("sponsor", "x".to_string())])
                    .await
                    .unwrap();
                assert!(page.data.is_empty());
            }

            #[tokio::test]
            async fn test_search_uses_indexed_fields() {
                let service = seeded().await;
                let query = GetQuery {
                    search_term: Some("ROCK".to_string()),
                    ..Default::default()
                };
                let page = service.list(&query, &[]).await.unwrap();
                assert_names(&page.data, &["Bruno", "Emil"]);
            }

            #[tokio::test]
            async fn test_search_restricted_to_keys() {
                let service = seeded().await;
                let query = GetQuery {
                    search_term: Some("an".to_string()),
                    search_term_keys: vec!["name".to_string()],
                    ..Default::default()
                };
                let page = service.list(&query, &[]).await.unwrap();
                assert_names(&page.data, &["Dana"]);
            }

            #[tokio::test]
            async fn test_sort_and_paginate() {
                let service = seeded().await;
                let query = GetQuery {
                    limit: Some(2),
                    offset: Some(1),
                    order: Some("followers:desc".to_string()),
                    ..Default::default()
                };
                let page = service.list(&query, &[]).await.unwrap();
                assert_names(&page.data, &["Emil", "Alice"]);
                assert_eq!(page.pagination.total_count, 5);
                assert!(page.pagination.has_next);
                assert!(page.pagination.has_prev);
            }

            #[tokio::test]
            async fn test_sort_by_name_ascending() {
                let service = seeded().await;
                let query = GetQuery {
                    order: Some("name".to_string()),
                    ..Default::default()
                };
                let page = service.list(&query, &[]).await.unwrap();
                assert_names(&page.data, &["Alice", "Bruno", "Chen", "Dana", "Emil"]);
            }

            // ==================================================================
            // Field lookups
            // ==================================================================

            #[tokio::test]
            async fn test_find_count_and_delete_by() {
                let service = seeded().await;
                let rock = service.find_by("genre", "Rock").await.unwrap();
                assert_count(&rock, 2);
                assert_field_value_string(&rock[0].field_value("genre").unwrap(), "Rock");

                assert_eq!(service.count_by("language", "EN").await.unwrap(), 2);
                assert_eq!(service.delete_by("genre", "Rock").await.unwrap(), 2);
                assert_eq!(service.count_by("genre", "Rock").await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_exists() {
                let service = $factory;
                let created = service
                    .create(create_test_influencer("Alice", "Pop", "EN", 1))
                    .await
                    .unwrap();
                assert!(service.exists(&created.id).await.unwrap());
                assert!(!service.exists(&Uuid::new_v4()).await.unwrap());
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let influencer = create_test_influencer("Alice", "Pop", "EN", 1);
                service.create(influencer.clone()).await.unwrap();
                assert!(service.create(influencer).await.is_err());
            }

            /// Concurrent creates from spawned tasks share one store
            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_access() {
                let service = $factory;
                let s1 = service.clone();
                let s2 = service.clone();

                let e1 = create_test_influencer("Concurrent_A", "Pop", "EN", 1);
                let e2 = create_test_influencer("Concurrent_B", "Pop", "EN", 2);
                let id1 = e1.id;
                let id2 = e2.id;

                let h1 = tokio::spawn(async move { s1.create(e1).await });
                let h2 = tokio::spawn(async move { s2.create(e2).await });

                let (r1, r2) = tokio::try_join!(h1, h2).unwrap();
                r1.unwrap();
                r2.unwrap();

                let page = service.list(&GetQuery::default(), &[]).await.unwrap();
                let ids: Vec<Uuid> = page.data.iter().map(|e| e.id()).collect();
                assert_count(&ids, 2);
                assert!(ids.contains(&id1));
                assert!(ids.contains(&id2));
            }
        }
    };
}
