//! Query Pipeline
//!
//! Pure evaluation of a [`QuerySpec`] over a product list:
//!
//! ```text
//! products ─▶ category ─▶ search ─▶ price ─▶ stable sort ─▶ prefix(page × page_size)
//! ```
//!
//! Every stage is a pure predicate or a stable sort, so the output is fully
//! determined by (products, spec, page_size). Ties keep catalog order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::query::{QuerySpec, SortKey};
use crate::models::Product;

/// Cumulative page of a Result Set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Prefix of the Result Set of length `min(page × page_size, total)`
    pub products: Vec<Product>,
    /// Result Set size (after filtering, before truncation)
    pub total: usize,
    /// `products.len()`
    pub shown: usize,
    pub page: u32,
    pub page_size: usize,
    /// More products would be revealed by the next page
    pub has_more: bool,
}

/// Evaluate `spec` against `products`, returning the visible prefix
pub fn evaluate(products: &[Product], spec: &QuerySpec, page_size: usize) -> Vec<Product> {
    let mut results = filter_and_sort(products, spec);
    results.truncate(spec.visible_len(page_size));
    results
}

/// Evaluate and report paging state alongside the visible prefix
pub fn evaluate_page(products: &[Product], spec: &QuerySpec, page_size: usize) -> CatalogPage {
    let mut results = filter_and_sort(products, spec);
    let total = results.len();
    let visible = spec.visible_len(page_size);
    results.truncate(visible);

    CatalogPage {
        shown: results.len(),
        products: results,
        total,
        page: spec.page(),
        page_size,
        has_more: visible < total,
    }
}

/// The Result Set: filtered and sorted, not truncated
pub fn filter_and_sort(products: &[Product], spec: &QuerySpec) -> Vec<Product> {
    let needle = spec.search_term().map(str::to_lowercase);
    let category = spec.category();
    let (min, max) = (spec.price_min(), spec.price_max());

    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| category.matches(p.category))
        .filter(|p| match &needle {
            Some(needle) => p.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .filter(|p| min.is_none_or(|min| p.price >= min))
        .filter(|p| max.is_none_or(|max| p.price <= max))
        .cloned()
        .collect();

    sort_products(&mut results, spec.sort());
    results
}

/// Stable sort in place by `key`
pub fn sort_products(products: &mut [Product], key: SortKey) {
    // `sort_by` is stable: equal keys keep their relative order
    match key {
        SortKey::Popular => products.sort_by(|a, b| b.orders.cmp(&a.orders)),
        SortKey::PriceLow => products.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortKey::Rating => products.sort_by(|a, b| cmp_f64(b.rating, a.rating)),
        SortKey::Newest => products.sort_by(|a, b| b.is_new.cmp(&a.is_new)),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
