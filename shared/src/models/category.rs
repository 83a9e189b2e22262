//! Category Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product category
///
/// Fixed set; the wire form is the lowercase id (`"electronics"`, `"home"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Sports,
    Beauty,
    Toys,
    Auto,
    Jewelry,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Sports,
        Category::Beauty,
        Category::Toys,
        Category::Auto,
        Category::Jewelry,
    ];

    pub const fn id(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::Home => "home",
            Category::Sports => "sports",
            Category::Beauty => "beauty",
            Category::Toys => "toys",
            Category::Auto => "auto",
            Category::Jewelry => "jewelry",
        }
    }

    /// English display name
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Home => "Home & Garden",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
            Category::Toys => "Toys & Games",
            Category::Auto => "Auto",
            Category::Jewelry => "Jewelry",
        }
    }

    /// Font Awesome icon class used by the storefront
    pub const fn icon(&self) -> &'static str {
        match self {
            Category::Electronics => "fa-laptop",
            Category::Fashion => "fa-shirt",
            Category::Home => "fa-house",
            Category::Sports => "fa-futbol",
            Category::Beauty => "fa-spa",
            Category::Toys => "fa-gamepad",
            Category::Auto => "fa-car",
            Category::Jewelry => "fa-gem",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a string is not a known category id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category selection of a query: every category, or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_ID: &'static str = "all";

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_ID,
            CategoryFilter::Only(c) => c.id(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_ID {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Category entry with product count (GET /api/categories)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// "all" or a category id
    pub id: String,
    pub name: String,
    pub icon: String,
    pub count: usize,
}
