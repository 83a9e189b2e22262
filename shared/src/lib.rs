//! Shared types for the deals catalog
//!
//! Domain types and pure catalog logic used by `deal-server` and mirrored by
//! the storefront: product models, the query pipeline, the wishlist set and
//! the unified error / response types.

pub mod catalog;
pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use catalog::{CatalogPage, QuerySpec, SortKey, Wishlist};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Category, CategoryFilter, Product, ProductCard};
