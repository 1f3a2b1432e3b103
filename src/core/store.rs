//! Order store contract
//!
//! The service layer only sees this trait; the concrete backend (in-memory,
//! MongoDB) is chosen at startup and injected.

use crate::core::error::StorageError;
use crate::core::order::{CakeOrder, NewCakeOrder};
use async_trait::async_trait;

/// Listing size used when the client does not pass a limit
pub const DEFAULT_LIST_LIMIT: usize = 25;

/// What a backend can tell about itself for the diagnostic endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDiagnostics {
    /// Backend name, e.g. "mongodb"
    pub backend: &'static str,
    /// Database name, when the backend has one
    pub database_name: Option<String>,
    /// Up to ten collection names found in the database
    pub collections: Vec<String>,
}

/// Persistence for cake orders
///
/// Orders are write-once: there is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order, assigning its id and timestamps.
    ///
    /// Returns the identifier as text.
    async fn insert(&self, order: NewCakeOrder) -> Result<String, StorageError>;

    /// Up to `limit` orders, most recently created first
    async fn list(&self, limit: usize) -> Result<Vec<CakeOrder>, StorageError>;

    /// Report backend status for `GET /test`
    async fn diagnostics(&self) -> Result<StoreDiagnostics, StorageError>;
}
