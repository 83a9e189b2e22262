//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品查询、搜索、手动刷新
//! - [`categories`] - 分类及商品数

pub mod categories;
pub mod health;
pub mod products;

use std::str::FromStr;

pub use crate::utils::{AppError, AppResult};

/// 解析可选查询参数，空字符串视为未设置
pub(crate) fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            AppError::validation(format!("Invalid value for '{}': {}", name, v))
                .with_detail("param", name)
        }),
    }
}
