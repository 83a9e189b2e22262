//! Deal Server - 联盟商品目录服务
//!
//! # 架构概述
//!
//! - **商品目录** (`catalog`): JSON 文件缓存 + 内存快照，整体替换式刷新
//! - **每日刷新** (`catalog::refresh`): 模拟价格/订单变化的定时任务
//! - **HTTP API** (`api`): 商品列表、分类、热门、搜索、手动刷新、健康检查
//! - **查询管线** (`shared::catalog`): 过滤、排序、累计分页的纯函数
//!
//! # 模块结构
//!
//! ```text
//! deal-server/src/
//! ├── core/          # 配置、状态、后台任务、错误
//! ├── catalog/       # 目录存储与刷新
//! ├── services/      # HTTP 服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、错误类型
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::catalog::{CatalogSnapshot, CatalogStore};
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use crate::utils::logger::init_logger_with_file;

/// 加载 `.env` 并初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    )
}

pub fn print_banner() {
    println!(
        r#"
    ____             __
   / __ \___  ____ _/ /
  / / / / _ \/ __ `/ /
 / /_/ /  __/ /_/ / /
/_____/\___/\__,_/_/
   ______
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
