//! Query spec: category, search, price range, sort and page
//!
//! [`QuerySpec`] is an immutable value. Every user action produces a new spec;
//! any filter or sort change resets the page to 1, and only [`QuerySpec::next_page`] advances it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::CategoryFilter;

/// Default page size
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Orders, descending
    #[default]
    Popular,
    /// Price, ascending
    PriceLow,
    /// Price, descending
    PriceHigh,
    /// Rating, descending
    Rating,
    /// New products first
    Newest,
}

impl SortKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Lenient parse: unknown sort keys fall back to [`SortKey::Popular`]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "rating" => SortKey::Rating,
            "newest" => SortKey::Newest,
            _ => SortKey::Popular,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query spec
///
/// Defaults: category=all, no search, no price range, sort=popular, page=1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    #[serde(default)]
    category: CategoryFilter,
    #[serde(default)]
    search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_max: Option<f64>,
    #[serde(default)]
    sort: SortKey,
    #[serde(default = "first_page")]
    page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            price_min: None,
            price_max: None,
            sort: SortKey::Popular,
            page: 1,
        }
    }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Raw search text (untrimmed)
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Trimmed search term; blank text means no search
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn price_min(&self) -> Option<f64> {
        self.price_min
    }

    pub fn price_max(&self) -> Option<f64> {
        self.price_max
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Any filter active (category, search or price)
    pub fn has_filters(&self) -> bool {
        self.category != CategoryFilter::All
            || self.search_term().is_some()
            || self.price_min.is_some()
            || self.price_max.is_some()
    }

    /// Cumulative number of products visible on the current page, `page × page_size`
    pub fn visible_len(&self, page_size: usize) -> usize {
        (self.page as usize).saturating_mul(page_size)
    }

    // ========== Transitions (each returns a new value) ==========

    /// Switch category: clears the search and resets the page to 1
    pub fn with_category(&self, category: impl Into<CategoryFilter>) -> Self {
        Self {
            category: category.into(),
            search: String::new(),
            page: 1,
            ..self.clone()
        }
    }

    /// Set the search text (keeps the category) and reset the page to 1
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into().trim().to_string(),
            page: 1,
            ..self.clone()
        }
    }

    /// Set the price range and reset the page to 1
    ///
    /// Non-finite bounds (NaN / Infinity) are treated as unset.
    pub fn with_price_range(&self, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            price_min: min.filter(|v| v.is_finite()),
            price_max: max.filter(|v| v.is_finite()),
            page: 1,
            ..self.clone()
        }
    }

    /// Clear the price range and reset the page to 1
    pub fn without_price_range(&self) -> Self {
        self.with_price_range(None, None)
    }

    /// Change the sort order and reset the page to 1
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }

    /// Load more: page + 1, everything else unchanged
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Jump to a page directly (rebuilding a spec from request params), at least 1
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}
