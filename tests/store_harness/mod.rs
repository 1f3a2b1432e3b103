//! Shared test harness for order store backends
//!
//! Provides order fixtures and the `order_store_tests!` macro, which checks
//! any [`OrderStore`] implementation against the storage contract.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use divine_flavours::storage::InMemoryOrderStore;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```

#![allow(dead_code)]

pub mod order_store_tests;

use divine_flavours::core::order::{CakeSize, NewCakeOrder};
use divine_flavours::core::pricing::price_omr;

/// A validated, priced order for `size` with the layer count its size requires
pub fn new_order(customer_name: &str, size: CakeSize) -> NewCakeOrder {
    NewCakeOrder {
        customer_name: customer_name.to_string(),
        phone: "+968 9000 0000".to_string(),
        size,
        layers: size.required_layers(),
        notes: None,
        reference_image_path: None,
        price_omr: price_omr(size),
    }
}

/// An order with every optional field filled in
pub fn full_order() -> NewCakeOrder {
    NewCakeOrder {
        notes: Some("Happy birthday Salim, no nuts".to_string()),
        reference_image_path: Some("/uploads/cake_photo_0f3c.png".to_string()),
        ..new_order("Maryam Al Balushi", CakeSize::Large)
    }
}
