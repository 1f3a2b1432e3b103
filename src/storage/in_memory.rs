//! In-memory implementation of OrderStore for testing and development

use crate::core::error::StorageError;
use crate::core::order::{CakeOrder, NewCakeOrder};
use crate::core::store::{OrderStore, StoreDiagnostics};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory order store
///
/// Orders are kept in insertion order, which is also creation order.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<CakeOrder>>>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewCakeOrder) -> Result<String, StorageError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        let id = Uuid::now_v7().to_string();
        orders.push(CakeOrder::from_new(id.clone(), order, Utc::now()));

        Ok(id)
    }

    async fn list(&self, limit: usize) -> Result<Vec<CakeOrder>, StorageError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StorageError::unavailable(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        Ok(orders.iter().rev().take(limit).cloned().collect())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StorageError> {
        Ok(StoreDiagnostics {
            backend: BACKEND,
            database_name: None,
            collections: vec![CakeOrder::COLLECTION.to_string()],
        })
    }
}
