//! MongoDB order store using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag (enabled by
//! default).
//!
//! # Storage model
//!
//! All orders live in one collection, [`CakeOrder::COLLECTION`] unless the
//! configuration names another. Each document is keyed by `_id`:
//!
//! - new orders get a time-ordered UUID (v7) stored as a string
//! - legacy documents keyed by an ObjectId are still read; the id is
//!   exposed in its hex form
//!
//! `created_at` / `updated_at` are native BSON datetimes so that sorting by
//! recency happens in the database.

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::order::{CakeOrder, NewCakeOrder};
use crate::core::store::{OrderStore, StoreDiagnostics};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

const BACKEND: &str = "mongodb";

/// Collection names reported by diagnostics
const DIAGNOSTIC_COLLECTIONS: usize = 10;

// ---------------------------------------------------------------------------
// Document mapping
// ---------------------------------------------------------------------------

/// Storage form of a cake order
#[derive(Debug, Serialize, Deserialize)]
struct OrderDocument {
    #[serde(rename = "_id")]
    id: Bson,

    #[serde(flatten)]
    order: NewCakeOrder,

    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl OrderDocument {
    fn new(id: String, order: NewCakeOrder, now: DateTime<Utc>) -> Self {
        let stamp = bson_datetime(now);
        Self {
            id: Bson::String(id),
            order,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn into_order(self) -> Result<CakeOrder, StorageError> {
        Ok(CakeOrder {
            id: id_text(&self.id),
            order: self.order,
            created_at: chrono_datetime(self.created_at)?,
            updated_at: chrono_datetime(self.updated_at)?,
        })
    }
}

/// Text form of a document key
fn id_text(id: &Bson) -> String {
    match id {
        Bson::String(s) => s.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

fn bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn chrono_datetime(at: bson::DateTime) -> Result<DateTime<Utc>, StorageError> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).ok_or_else(|| StorageError::Corrupted {
        message: format!("timestamp out of range: {}", at.timestamp_millis()),
    })
}

fn to_document(order: &OrderDocument) -> Result<Document, StorageError> {
    bson::to_document(order).map_err(|e| StorageError::Corrupted {
        message: format!("Failed to encode order: {}", e),
    })
}

fn from_document(doc: Document) -> Result<CakeOrder, StorageError> {
    let stored: OrderDocument = bson::from_document(doc).map_err(|e| StorageError::Corrupted {
        message: format!("Failed to decode order: {}", e),
    })?;
    stored.into_order()
}

fn unavailable(action: &str, e: mongodb::error::Error) -> StorageError {
    StorageError::unavailable(BACKEND, format!("Failed to {}: {}", action, e))
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Build a client for the configured database.
///
/// The driver connects lazily; the server-selection timeout bounds how long
/// an operation waits for an unreachable server before failing.
pub async fn connect(config: &DatabaseConfig) -> Result<MongoOrderStore, StorageError> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| StorageError::unavailable(BACKEND, "no database URL configured"))?;

    let mut options = ClientOptions::parse(url)
        .await
        .map_err(|e| unavailable("parse connection string", e))?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_selection_timeout = Some(Duration::from_secs(config.connect_timeout_secs));

    let client = Client::with_options(options).map_err(|e| unavailable("create client", e))?;
    let database = client.database(&config.name);

    tracing::info!(database = %config.name, collection = %config.collection, "using MongoDB order store");

    Ok(MongoOrderStore::with_collection(database, &config.collection))
}

// ---------------------------------------------------------------------------
// MongoOrderStore
// ---------------------------------------------------------------------------

/// Order store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use divine_flavours::storage::MongoOrderStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoOrderStore::new(client.database("divine_flavours"));
/// let id = store.insert(order).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoOrderStore {
    database: Database,
    collection_name: String,
}

impl MongoOrderStore {
    /// Store orders in [`CakeOrder::COLLECTION`]
    pub fn new(database: Database) -> Self {
        Self::with_collection(database, CakeOrder::COLLECTION)
    }

    /// Store orders in an explicitly named collection
    pub fn with_collection(database: Database, collection_name: &str) -> Self {
        Self {
            database,
            collection_name: collection_name.to_string(),
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.collection_name)
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn insert(&self, order: NewCakeOrder) -> Result<String, StorageError> {
        let id = Uuid::now_v7().to_string();
        let doc = to_document(&OrderDocument::new(id.clone(), order, Utc::now()))?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| unavailable("insert order", e))?;

        Ok(id)
    }

    async fn list(&self, limit: usize) -> Result<Vec<CakeOrder>, StorageError> {
        // a zero limit means "no limit" to MongoDB
        if limit == 0 {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(|e| unavailable("list orders", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| unavailable("collect orders", e))?;

        docs.into_iter().map(from_document).collect()
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StorageError> {
        let mut collections = self
            .database
            .list_collection_names()
            .await
            .map_err(|e| unavailable("list collections", e))?;
        collections.truncate(DIAGNOSTIC_COLLECTIONS);

        Ok(StoreDiagnostics {
            backend: BACKEND,
            database_name: Some(self.database.name().to_string()),
            collections,
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests for conversion helpers (no MongoDB instance required)
// ---------------------------------------------------------------------------
