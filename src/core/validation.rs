//! Order validation rules
//!
//! Rules run in a fixed order so the same request always produces the same
//! error:
//!
//! 1. `size` is lowercased and must be small, medium or large
//! 2. `layers` must agree with the size (medium = 2, large = 3)
//! 3. `customer_name` and `phone` must be present
//!
//! Nothing here performs I/O; storing the reference image and pricing happen
//! in [`crate::core::service::OrderService::validate_and_price`].

use crate::core::error::ValidationError;
use crate::core::order::{CakeSize, OrderSubmission};
use validator::Validate;

/// The normalized outcome of the size and layer rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CakeSpec {
    pub size: CakeSize,
    pub layers: Option<u8>,
}

/// Check a submission and normalize its size and layers
pub fn validate_submission(submission: &OrderSubmission) -> Result<CakeSpec, ValidationError> {
    let size = validate_size(submission.size.as_deref())?;
    let layers = validate_layers(size, submission.layers)?;
    validate_contact(submission)?;

    Ok(CakeSpec { size, layers })
}

/// Rule 1: size is required and case-insensitive
pub fn validate_size(raw: Option<&str>) -> Result<CakeSize, ValidationError> {
    raw.and_then(CakeSize::parse)
        .ok_or_else(|| ValidationError::InvalidSize {
            given: raw.map(str::to_string),
        })
}

/// Rule 2: the stored layer count always comes from the size.
///
/// A supplied value for medium or large must match; for small it is dropped.
pub fn validate_layers(size: CakeSize, given: Option<i64>) -> Result<Option<u8>, ValidationError> {
    let Some(required) = size.required_layers() else {
        if let Some(layers) = given {
            tracing::debug!(layers, "ignoring layer count supplied for a small cake");
        }
        return Ok(None);
    };

    match given {
        Some(layers) if layers != i64::from(required) => Err(ValidationError::InvalidLayers {
            size,
            required,
            given: layers,
        }),
        _ => Ok(Some(required)),
    }
}

/// Rule 3: contact fields are present
fn validate_contact(submission: &OrderSubmission) -> Result<(), ValidationError> {
    let Err(errors) = submission.validate() else {
        return Ok(());
    };

    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    Err(ValidationError::MissingField {
        field: fields
            .into_iter()
            .next()
            .unwrap_or_else(|| "customer_name".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(size: &str) -> OrderSubmission {
        OrderSubmission::new("Aisha", "+968 9123 4567").with_size(size)
    }

    #[test]
    fn test_small_without_layers() {
        let spec = validate_submission(&submission("small")).unwrap();
        assert_eq!(spec.size, CakeSize::Small);
        assert_eq!(spec.layers, None);
    }

    #[test]
    fn test_small_discards_supplied_layers() {
        let spec = validate_submission(&submission("small").with_layers(3)).unwrap();
        assert_eq!(spec.layers, None);
    }

    #[test]
    fn test_medium_layers() {
        let implicit = validate_submission(&submission("medium")).unwrap();
        assert_eq!(implicit.layers, Some(2));

        let explicit = validate_submission(&submission("medium").with_layers(2)).unwrap();
        assert_eq!(explicit.layers, Some(2));

        let wrong = validate_submission(&submission("medium").with_layers(3)).unwrap_err();
        assert_eq!(
            wrong,
            ValidationError::InvalidLayers {
                size: CakeSize::Medium,
                required: 2,
                given: 3
            }
        );
    }

    #[test]
    fn test_large_layers() {
        let implicit = validate_submission(&submission("large")).unwrap();
        assert_eq!(implicit.layers, Some(3));

        let explicit = validate_submission(&submission("large").with_layers(3)).unwrap();
        assert_eq!(explicit.layers, Some(3));

        let wrong = validate_submission(&submission("large").with_layers(2)).unwrap_err();
        assert!(matches!(wrong, ValidationError::InvalidLayers { required: 3, given: 2, .. }));
    }

    #[test]
    fn test_size_is_normalized() {
        let spec = validate_submission(&submission("LARGE")).unwrap();
        assert_eq!(spec.size, CakeSize::Large);
    }

    #[test]
    fn test_unknown_size_wins_over_other_errors() {
        let request = OrderSubmission::new("", "")
            .with_size("xlarge")
            .with_layers(7)
            .with_notes("anything");

        let err = validate_submission(&request).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidSize {
                given: Some("xlarge".to_string())
            }
        );
    }

    #[test]
    fn test_missing_size() {
        let request = OrderSubmission::new("Aisha", "+968 9123 4567");
        let err = validate_submission(&request).unwrap_err();
        assert_eq!(err, ValidationError::InvalidSize { given: None });
    }

    #[test]
    fn test_missing_contact_fields() {
        let no_name = OrderSubmission::new("", "+968 9123 4567").with_size("small");
        assert_eq!(
            validate_submission(&no_name).unwrap_err(),
            ValidationError::MissingField {
                field: "customer_name".to_string()
            }
        );

        let no_phone = OrderSubmission::new("Aisha", "").with_size("small");
        assert_eq!(
            validate_submission(&no_phone).unwrap_err(),
            ValidationError::MissingField {
                field: "phone".to_string()
            }
        );
    }

    #[test]
    fn test_phone_format_is_not_checked() {
        let request = OrderSubmission::new("Aisha", "call me maybe").with_size("small");
        assert!(validate_submission(&request).is_ok());
    }
}
