//! # Divine Flavours
//!
//! Order backend for a home bakery. Customers submit a cake order through a
//! multipart form, optionally with a reference picture; the service validates
//! the size and layer rules, prices the cake in Omani rial, stores the picture
//! and persists the order. Staff list the most recent orders.
//!
//! ## Features
//!
//! - **Sizes and layers**: small (single tier), medium (2 layers), large (3 layers)
//! - **Flat pricing**: 8 / 12 / 16 OMR, no delivery charge
//! - **Reference images**: stored on disk under collision-free names and served back
//! - **Pluggable storage**: MongoDB in production, in-memory for development and tests
//! - **Configuration**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use divine_flavours::prelude::*;
//!
//! let config = AppConfig::load()?;
//! let store = divine_flavours::storage::from_config(&config.database).await?;
//!
//! ServerBuilder::new()
//!     .with_config(config)
//!     .with_order_store(store)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        error::{BakeryError, StorageError, UploadError, ValidationError},
        order::{CakeOrder, CakeSize, ImageUpload, NewCakeOrder, OrderSubmission},
        pricing::price_omr,
        service::{OrderReceipt, OrderService},
        store::{OrderStore, StoreDiagnostics},
        upload::{ImageStore, LocalImageStore},
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoOrderStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
