//! Currencies a product is sold in.

use serde::{Deserialize, Serialize};

/// Supported selling currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Sos,
    Etb,
}

impl Currency {
    /// Display order used everywhere a price line is shown.
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Sos, Currency::Etb];

    /// ISO currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Sos => "SOS",
            Currency::Etb => "ETB",
        }
    }

    /// Symbol printed in front of the amount, if any.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Sos | Currency::Etb => "",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// The three selling prices of a product, one per [`Currency`].
///
/// SOS and ETB are derived server-side from USD using the configured rates;
/// the client just displays and echoes them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SellingPrices {
    #[serde(rename = "selling_price_usd")]
    pub usd: f64,
    #[serde(rename = "selling_price_sos")]
    pub sos: f64,
    #[serde(rename = "selling_price_etb")]
    pub etb: f64,
}

impl SellingPrices {
    pub fn new(usd: f64, sos: f64, etb: f64) -> Self {
        Self { usd, sos, etb }
    }

    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.usd,
            Currency::Sos => self.sos,
            Currency::Etb => self.etb,
        }
    }

    /// Prices in [`Currency::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        Currency::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// `USD: $12.5 | SOS: 7000 | ETB: 650`
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(c, amount)| format!("{}: {}{}", c.code(), c.symbol(), amount))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
