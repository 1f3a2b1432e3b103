//! Order use cases
//!
//! `OrderService` ties the validator, the image store and the order store
//! together. It holds no mutable state of its own.

use crate::core::error::{BakeryError, StorageError, ValidationError};
use crate::core::order::{CakeOrder, NewCakeOrder, OrderSubmission};
use crate::core::pricing::price_omr;
use crate::core::store::{DEFAULT_LIST_LIMIT, OrderStore, StoreDiagnostics};
use crate::core::upload::ImageStore;
use crate::core::validation::validate_submission;
use std::sync::Arc;

/// Largest listing size served unless configured otherwise
pub const DEFAULT_MAX_LIST_LIMIT: usize = 100;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub id: String,
    pub price_omr: f64,
}

/// Order submission and listing
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    images: Arc<dyn ImageStore>,
    default_limit: usize,
    max_limit: usize,
}

impl OrderService {
    /// Create a service over an order store and an image store
    pub fn new(store: Arc<dyn OrderStore>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            store,
            images,
            default_limit: DEFAULT_LIST_LIMIT,
            max_limit: DEFAULT_MAX_LIST_LIMIT,
        }
    }

    /// Override listing limits. `max_limit` is never below `default_limit`.
    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit.max(1);
        self.max_limit = max_limit.max(self.default_limit);
        self
    }

    /// Underlying order store
    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }

    /// Validate a submission, store its reference image and price it.
    ///
    /// The image is written only once every rule has passed, so a rejected
    /// request leaves nothing behind.
    pub async fn validate_and_price(
        &self,
        submission: OrderSubmission,
    ) -> Result<NewCakeOrder, BakeryError> {
        let spec = validate_submission(&submission)?;

        let reference_image_path = match &submission.reference_image {
            Some(upload) => Some(self.images.save(upload).await?),
            None => None,
        };

        Ok(NewCakeOrder {
            customer_name: submission.customer_name,
            phone: submission.phone,
            size: spec.size,
            layers: spec.layers,
            notes: submission.notes,
            reference_image_path,
            price_omr: price_omr(spec.size),
        })
    }

    /// Validate, price and persist an order
    pub async fn submit(&self, submission: OrderSubmission) -> Result<OrderReceipt, BakeryError> {
        let order = self.validate_and_price(submission).await?;
        let price_omr = order.price_omr;
        let size = order.size;
        let image = order.reference_image_path.clone();

        let id = match self.store.insert(order).await {
            Ok(id) => id,
            Err(e) => {
                if let Some(path) = image {
                    self.discard_image(&path).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(order_id = %id, %size, price_omr, "order created");

        Ok(OrderReceipt { id, price_omr })
    }

    /// Most recent orders, newest first.
    ///
    /// `None` means the default limit; anything above the maximum is clamped.
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<CakeOrder>, BakeryError> {
        let limit = self.resolve_limit(limit)?;
        Ok(self.store.list(limit).await?)
    }

    /// Backend status for the diagnostic endpoint
    pub async fn diagnostics(&self) -> Result<StoreDiagnostics, StorageError> {
        self.store.diagnostics().await
    }

    fn resolve_limit(&self, limit: Option<i64>) -> Result<usize, ValidationError> {
        match limit {
            None => Ok(self.default_limit),
            Some(given) if given < 1 => Err(ValidationError::InvalidLimit { given }),
            Some(given) => Ok(usize::try_from(given)
                .unwrap_or(self.max_limit)
                .min(self.max_limit)),
        }
    }

    async fn discard_image(&self, path: &str) {
        if let Err(e) = self.images.discard(path).await {
            tracing::warn!(path, error = %e, "failed to remove image of unsaved order");
        }
    }
}
