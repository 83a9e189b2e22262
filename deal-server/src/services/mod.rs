//! 服务模块
//!
//! - [`build_router`] - 路由构建 (状态 + 中间件)
//! - [`serve`] - 绑定端口并运行 HTTP 服务

pub mod http;

pub use self::http::{build_app, build_router, serve};
