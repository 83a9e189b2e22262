//! Catalog core - query specification, query pipeline, wishlist
//!
//! Everything here is pure: no I/O, no logging side effects, no shared state.
//!
//! - [`QuerySpec`] - immutable filter/sort/page selection
//! - [`evaluate`] / [`evaluate_page`] - the Query Pipeline
//! - [`Wishlist`] - set of product IDs with symmetric toggle
//! - [`money`] - decimal helpers for prices and discounts

pub mod money;
pub mod pipeline;
pub mod query;
pub mod wishlist;

pub use pipeline::{CatalogPage, evaluate, evaluate_page, filter_and_sort, sort_products};
pub use query::{DEFAULT_PAGE_SIZE, QuerySpec, SortKey};
pub use wishlist::Wishlist;
