//! Product Model

use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::catalog::money;

/// Product entity
///
/// Immutable for the lifetime of one catalog snapshot; a refresh replaces the
/// whole list. Field names are camelCase on the wire to match the cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, unique within the catalog
    pub id: String,
    pub title: String,
    /// Current price
    pub price: f64,
    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: Category,
    /// 0.0 - 5.0
    pub rating: f64,
    pub reviews: u64,
    pub orders: u64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Affiliate link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Discount percentage shown on the product card
    ///
    /// 0 when there is no original price. A negative raw discount
    /// (`originalPrice < price`) is clamped to 0; use
    /// [`has_price_anomaly`](Self::has_price_anomaly) to detect it.
    pub fn discount_percent(&self) -> u32 {
        self.original_price
            .map(|original| money::raw_discount_percent(self.price, original))
            .map(|d| d.clamp(0, 100) as u32)
            .unwrap_or(0)
    }

    /// `originalPrice` present but lower than `price`
    pub fn has_price_anomaly(&self) -> bool {
        self.original_price.is_some_and(|original| original < self.price)
    }
}

/// Product as returned by the API: the stored fields plus the computed discount
///
/// Only serialized outward; the cache file keeps plain [`Product`] entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: u32,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        let discount_percent = product.discount_percent();
        Self {
            product,
            discount_percent,
        }
    }
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        product.clone().into()
    }
}
