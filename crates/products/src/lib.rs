//! Product catalog read model.
//!
//! The shapes here mirror what the product search/update endpoints return.
//! Records are read-only inputs to rendering; nothing in this crate mutates
//! stock or prices.

pub mod currency;
pub mod product;

pub use currency::{Currency, SellingPrices};
pub use product::{ProductRecord, ProductUpdate};
