//! Fixed price list

use crate::core::order::CakeSize;

/// Delivery is folded into every base price.
pub const DELIVERY_OMR: f64 = 0.0;

/// Base price for a size, in Omani rials
pub fn base_price_omr(size: CakeSize) -> f64 {
    match size {
        CakeSize::Small => 8.0,
        CakeSize::Medium => 12.0,
        CakeSize::Large => 16.0,
    }
}

/// Total charged for a cake of this size, delivery included
pub fn price_omr(size: CakeSize) -> f64 {
    base_price_omr(size) + DELIVERY_OMR
}
