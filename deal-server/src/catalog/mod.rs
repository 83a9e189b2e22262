//! 商品目录 - 文件存储与每日刷新
//!
//! - [`CatalogStore`] - JSON 缓存文件 + 内存快照
//! - [`RefreshScheduler`] - 每日价格/订单扰动

pub mod refresh;
pub mod store;

pub use refresh::{RefreshScheduler, perturb, run_refresh};
pub use store::{CatalogSnapshot, CatalogStore};
