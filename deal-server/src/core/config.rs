use std::path::PathBuf;
use std::time::Duration;

use shared::catalog::DEFAULT_PAGE_SIZE;

/// 服务器配置 - 目录服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | CATALOG_PATH | data/products.json | 商品缓存文件 |
/// | STATIC_DIR | (未设置) | 前端静态文件目录 |
/// | PAGE_SIZE | 12 | 搜索接口每页数量 |
/// | TRENDING_LIMIT | 10 | 热门接口默认数量 |
/// | REFRESH_ENABLED | true | 是否启用每日刷新 |
/// | REFRESH_HOUR_UTC | 0 | 每日刷新时间 (UTC 小时) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
/// | LOG_JSON | false | JSON 格式日志 |
///
/// # 示例
///
/// ```ignore
/// CATALOG_PATH=/data/products.json HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 商品缓存文件路径 (`{ products, lastUpdated }`)
    pub catalog_path: PathBuf,
    /// 前端静态文件目录，未设置时只提供 API
    pub static_dir: Option<PathBuf>,
    /// 搜索接口每页数量
    pub page_size: usize,
    /// 热门接口默认数量
    pub trending_limit: usize,
    /// 是否启用每日刷新任务
    pub refresh_enabled: bool,
    /// 每日刷新时间 (UTC 小时, 0-23)
    pub refresh_hour_utc: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 是否输出 JSON 格式日志
    pub log_json: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/products.json".into())
                .into(),
            static_dir: env_opt("STATIC_DIR").map(PathBuf::from),
            page_size: env_parse("PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
            trending_limit: env_parse("TRENDING_LIMIT", 10).max(1),
            refresh_enabled: env_parse("REFRESH_ENABLED", true),
            refresh_hour_utc: env_parse("REFRESH_HOUR_UTC", 0u32).min(23),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            log_json: env_parse("LOG_JSON", false),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景 (关闭每日刷新)
    pub fn with_overrides(catalog_path: impl Into<PathBuf>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.catalog_path = catalog_path.into();
        config.http_port = http_port;
        config.refresh_enabled = false;
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
