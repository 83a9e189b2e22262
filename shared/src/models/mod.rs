//! Data models
//!
//! Shared between deal-server and the storefront (via API).

pub mod category;
pub mod product;

// Re-exports
pub use category::*;
pub use product::*;
