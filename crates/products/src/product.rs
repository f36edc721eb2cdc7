use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;

use crate::currency::SellingPrices;

/// One row of the product list, as returned by the product search endpoint.
///
/// Stock quantities are fractional because some products are sold by length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    pub current_stock: f64,
    pub low_stock_threshold: f64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(flatten)]
    pub prices: SellingPrices,
}

impl ProductRecord {
    /// Low stock when the current level is at or below the threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.low_stock_threshold
    }
}

/// Product snapshot echoed back by a successful update.
///
/// Amounts are decimal strings exactly as the server formatted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: String,
    pub purchase_price: String,
    pub selling_price_usd: String,
    pub selling_price_sos: String,
    pub selling_price_etb: String,
}
