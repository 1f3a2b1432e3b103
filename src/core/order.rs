//! Cake order model
//!
//! Three shapes of the same order travel through the system:
//! - [`OrderSubmission`]: what the client sent, unvalidated
//! - [`NewCakeOrder`]: validated and priced, not yet persisted
//! - [`CakeOrder`]: a persisted record with its identifier and timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Cake size offered by the bakery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CakeSize {
    Small,
    Medium,
    Large,
}

impl CakeSize {
    /// All sizes, smallest first
    pub const ALL: [CakeSize; 3] = [CakeSize::Small, CakeSize::Medium, CakeSize::Large];

    /// Parse a client-supplied size, ignoring case.
    ///
    /// Returns `None` for anything outside {small, medium, large}.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "small" => Some(CakeSize::Small),
            "medium" => Some(CakeSize::Medium),
            "large" => Some(CakeSize::Large),
            _ => None,
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CakeSize::Small => "small",
            CakeSize::Medium => "medium",
            CakeSize::Large => "large",
        }
    }

    /// Number of layers a cake of this size is always made with.
    ///
    /// Small cakes are single-tier and carry no layer count.
    pub fn required_layers(&self) -> Option<u8> {
        match self {
            CakeSize::Small => None,
            CakeSize::Medium => Some(2),
            CakeSize::Large => Some(3),
        }
    }
}

impl fmt::Display for CakeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference picture attached to an order submission
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Filename as sent by the client (may contain spaces or directories)
    pub filename: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

// Keep image bytes out of logs.
impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An order request exactly as received from the client.
///
/// Only presence of `customer_name` and `phone` is checked here; the size and
/// layer rules live in [`crate::core::validation`].
#[derive(Debug, Clone, Default, Validate)]
pub struct OrderSubmission {
    #[validate(length(min = 1, message = "customer_name is required"))]
    pub customer_name: String,

    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,

    /// Raw size text, matched case-insensitively
    pub size: Option<String>,

    pub layers: Option<i64>,

    pub notes: Option<String>,

    pub reference_image: Option<ImageUpload>,
}

impl OrderSubmission {
    /// Start a submission with the two mandatory contact fields
    pub fn new(customer_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_layers(mut self, layers: i64) -> Self {
        self.layers = Some(layers);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_reference_image(mut self, image: ImageUpload) -> Self {
        self.reference_image = Some(image);
        self
    }
}

/// A validated, priced order waiting to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCakeOrder {
    pub customer_name: String,
    pub phone: String,
    pub size: CakeSize,
    pub layers: Option<u8>,
    pub notes: Option<String>,
    pub reference_image_path: Option<String>,
    pub price_omr: f64,
}

/// A persisted cake order
///
/// `id`, `created_at` and `updated_at` are assigned by the order store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakeOrder {
    pub id: String,

    #[serde(flatten)]
    pub order: NewCakeOrder,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CakeOrder {
    /// Storage location (collection or table) holding cake orders
    pub const COLLECTION: &'static str = "cakeorder";

    /// Stamp a new order with its identifier and creation time
    pub fn from_new(id: impl Into<String>, order: NewCakeOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_size_is_case_insensitive() {
        assert_eq!(CakeSize::parse("small"), Some(CakeSize::Small));
        assert_eq!(CakeSize::parse("MEDIUM"), Some(CakeSize::Medium));
        assert_eq!(CakeSize::parse("LaRgE"), Some(CakeSize::Large));
    }

    #[test]
    fn test_parse_size_rejects_unknown() {
        assert_eq!(CakeSize::parse("xlarge"), None);
        assert_eq!(CakeSize::parse(""), None);
        assert_eq!(CakeSize::parse(" small"), None);
    }

    #[test]
    fn test_required_layers() {
        assert_eq!(CakeSize::Small.required_layers(), None);
        assert_eq!(CakeSize::Medium.required_layers(), Some(2));
        assert_eq!(CakeSize::Large.required_layers(), Some(3));
    }

    #[test]
    fn test_size_serializes_lowercase() {
        assert_eq!(serde_json::to_value(CakeSize::Medium).unwrap(), json!("medium"));
        let parsed: CakeSize = serde_json::from_value(json!("large")).unwrap();
        assert_eq!(parsed, CakeSize::Large);
    }

    #[test]
    fn test_cake_order_serializes_flat() {
        let now = Utc::now();
        let order = CakeOrder::from_new(
            "abc",
            NewCakeOrder {
                customer_name: "Aisha".to_string(),
                phone: "+968 9000 0000".to_string(),
                size: CakeSize::Medium,
                layers: Some(2),
                notes: None,
                reference_image_path: None,
                price_omr: 12.0,
            },
            now,
        );

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["customer_name"], "Aisha");
        assert_eq!(value["size"], "medium");
        assert_eq!(value["layers"], 2);
        assert_eq!(value["price_omr"], 12.0);
        assert!(value["notes"].is_null());
        assert!(value["created_at"].is_string());
        assert_eq!(value["created_at"], value["updated_at"]);
    }

    #[test]
    fn test_image_upload_debug_hides_bytes() {
        let upload = ImageUpload::new("cake.png", vec![0u8; 2048]);
        let debug = format!("{:?}", upload);
        assert!(debug.contains("cake.png"));
        assert!(debug.contains("2048"));
    }
}
