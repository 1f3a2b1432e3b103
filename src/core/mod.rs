//! Core module containing the order model, business rules and storage seams

pub mod error;
pub mod order;
pub mod pricing;
pub mod service;
pub mod store;
pub mod upload;
pub mod validation;

pub use error::{BakeryError, StorageError, UploadError, ValidationError};
pub use order::{CakeOrder, CakeSize, ImageUpload, NewCakeOrder, OrderSubmission};
pub use service::{OrderReceipt, OrderService};
pub use store::{OrderStore, StoreDiagnostics};
pub use upload::{ImageStore, LocalImageStore};
