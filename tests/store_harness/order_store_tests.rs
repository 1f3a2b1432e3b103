//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! # Generated Tests
//!
//! - `test_list_empty`: listing an empty store returns an empty vec
//! - `test_insert_returns_unique_ids`: ids are non-empty and distinct
//! - `test_round_trip_fields`: every field reads back as written
//! - `test_list_newest_first`: orders come back newest first
//! - `test_list_respects_limit`: at most `limit` orders are returned
//! - `test_list_zero_limit`: a zero limit returns nothing
//! - `test_timestamps_assigned`: created_at and updated_at are set on insert
//! - `test_diagnostics_lists_orders_collection`: diagnostics name the backend
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks all land

/// Generate a full `OrderStore` conformance test suite.
///
/// `$factory` must evaluate to a value implementing `OrderStore + Clone + 'static`.
/// It is re-evaluated for each test so every test starts from an empty store.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use chrono::Utc;
            use divine_flavours::core::order::CakeSize;
            use divine_flavours::core::store::OrderStore;
            use std::collections::HashSet;

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;

                let orders = store.list(25).await.unwrap();
                assert!(orders.is_empty(), "A fresh store should hold no orders");
            }

            #[tokio::test]
            async fn test_insert_returns_unique_ids() {
                let store = $factory;

                let mut ids = HashSet::new();
                for i in 0..5 {
                    let id = store
                        .insert(new_order(&format!("Customer {}", i), CakeSize::Small))
                        .await
                        .unwrap();
                    assert!(!id.is_empty());
                    ids.insert(id);
                }
                assert_eq!(ids.len(), 5, "Every insert should get its own id");
            }

            #[tokio::test]
            async fn test_round_trip_fields() {
                let store = $factory;
                let order = full_order();

                let id = store.insert(order.clone()).await.unwrap();
                let orders = store.list(10).await.unwrap();

                assert_eq!(orders.len(), 1);
                assert_eq!(orders[0].id, id);
                assert_eq!(orders[0].order, order);
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;

                let first = store.insert(new_order("First", CakeSize::Small)).await.unwrap();
                let second = store.insert(new_order("Second", CakeSize::Medium)).await.unwrap();
                let third = store.insert(new_order("Third", CakeSize::Large)).await.unwrap();

                let ids: Vec<String> = store
                    .list(10)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|o| o.id)
                    .collect();
                assert_eq!(ids, vec![third, second, first]);
            }

            #[tokio::test]
            async fn test_list_respects_limit() {
                let store = $factory;

                for name in ["A", "B", "C"] {
                    store.insert(new_order(name, CakeSize::Small)).await.unwrap();
                }

                let orders = store.list(2).await.unwrap();
                let names: Vec<&str> = orders.iter().map(|o| o.order.customer_name.as_str()).collect();
                assert_eq!(names, vec!["C", "B"]);
            }

            #[tokio::test]
            async fn test_list_zero_limit() {
                let store = $factory;
                store.insert(new_order("A", CakeSize::Small)).await.unwrap();

                assert!(store.list(0).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_timestamps_assigned() {
                let store = $factory;
                let before = Utc::now() - chrono::Duration::seconds(1);

                store.insert(new_order("A", CakeSize::Medium)).await.unwrap();
                let order = store.list(1).await.unwrap().remove(0);

                assert!(order.created_at >= before);
                assert!(order.created_at <= Utc::now());
                assert_eq!(order.created_at, order.updated_at);
            }

            #[tokio::test]
            async fn test_diagnostics_lists_orders_collection() {
                let store = $factory;
                store.insert(new_order("A", CakeSize::Small)).await.unwrap();

                let report = store.diagnostics().await.unwrap();
                assert!(!report.backend.is_empty());
                assert!(
                    report.collections.iter().any(|c| c == "cakeorder"),
                    "Diagnostics should list the orders collection, got {:?}",
                    report.collections
                );
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(new_order(&format!("Concurrent {}", i), CakeSize::Small))
                            .await
                            .unwrap()
                    }));
                }

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list(100).await.unwrap().len(), 10);
            }
        }
    };
}
