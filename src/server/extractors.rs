//! Axum extractor for the order form
//!
//! `POST /orders` is a multipart form. [`OrderForm`] reads every field into an
//! [`OrderSubmission`] and leaves the business rules to the service.

use crate::core::error::{BakeryError, ValidationError};
use crate::core::order::{ImageUpload, OrderSubmission};
use crate::core::validation::validate_size;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

/// Multipart field names accepted by `POST /orders`
pub mod fields {
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const PHONE: &str = "phone";
    pub const SIZE: &str = "size";
    pub const LAYERS: &str = "layers";
    pub const NOTES: &str = "notes";
    pub const REFERENCE_IMAGE: &str = "reference_image";
}

/// Extractor producing an [`OrderSubmission`] from a multipart body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(OrderForm(submission): OrderForm) -> Result<Json<Value>, BakeryError> {
///     // submission holds the raw fields, not yet validated
/// }
/// ```
#[derive(Debug)]
pub struct OrderForm(pub OrderSubmission);

impl<S> FromRequest<S> for OrderForm
where
    S: Send + Sync,
{
    type Rejection = BakeryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            ValidationError::MalformedForm {
                message: e.body_text(),
            }
        })?;

        let mut submission = OrderSubmission::default();
        let mut raw_layers: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                fields::CUSTOMER_NAME => submission.customer_name = text(field).await?,
                fields::PHONE => submission.phone = text(field).await?,
                fields::SIZE => submission.size = Some(text(field).await?),
                fields::LAYERS => raw_layers = non_empty(text(field).await?),
                fields::NOTES => submission.notes = non_empty(text(field).await?),
                fields::REFERENCE_IMAGE => submission.reference_image = image(field).await?,
                _ => tracing::debug!(field = %name, "ignoring unknown order form field"),
            }
        }

        if let Some(raw) = raw_layers {
            submission.layers = Some(parse_layers(&raw, submission.size.as_deref())?);
        }

        Ok(OrderForm(submission))
    }
}

/// Parse the `layers` field.
///
/// An unknown size is reported before a malformed layer count.
fn parse_layers(raw: &str, size: Option<&str>) -> Result<i64, ValidationError> {
    raw.trim().parse().or_else(|_| {
        validate_size(size)?;
        Err(ValidationError::MalformedLayers {
            value: raw.to_string(),
        })
    })
}

async fn text(field: Field<'_>) -> Result<String, ValidationError> {
    field.text().await.map_err(form_error)
}

/// Read the file part; a file input left empty by the browser counts as absent.
async fn image(field: Field<'_>) -> Result<Option<ImageUpload>, ValidationError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await.map_err(form_error)?;

    if filename.is_empty() && bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload::new(filename, bytes.to_vec())))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn form_error(e: MultipartError) -> ValidationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::PayloadTooLarge {
            message: e.body_text(),
        }
    } else {
        ValidationError::MalformedForm {
            message: e.body_text(),
        }
    }
}
