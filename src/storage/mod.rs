//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryOrderStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoOrderStore;

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::store::OrderStore;
use std::sync::Arc;

/// Pick the order store for this configuration.
///
/// A configured database URL selects MongoDB. Without one, orders live in
/// memory and are lost on restart.
pub async fn from_config(config: &DatabaseConfig) -> Result<Arc<dyn OrderStore>, StorageError> {
    match config.url.as_deref() {
        #[cfg(feature = "mongodb_backend")]
        Some(_) => Ok(Arc::new(mongodb::connect(config).await?)),
        #[cfg(not(feature = "mongodb_backend"))]
        Some(_) => Err(StorageError::unavailable(
            "mongodb",
            "a database URL is configured but the mongodb_backend feature is disabled",
        )),
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory only");
            Ok(Arc::new(InMemoryOrderStore::new()))
        }
    }
}
