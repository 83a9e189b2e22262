use crate::api::health;
use crate::catalog::{CatalogStore, RefreshScheduler};
use crate::core::{BackgroundTasks, Config, TaskKind};

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 为浅拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | catalog | CatalogStore | 商品目录 (文件缓存 + 内存快照) |
///
/// 路由由 [`crate::services::build_router`] 按需构建，状态本身不持有路由。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub catalog: CatalogStore,
}

impl ServerState {
    pub fn new(config: Config, catalog: CatalogStore) -> Self {
        Self { config, catalog }
    }

    /// 加载商品目录
    ///
    /// 缓存文件缺失或损坏不会导致启动失败，目录为空。
    pub async fn initialize(config: &Config) -> Self {
        health::mark_started();

        let catalog = CatalogStore::open(&config.catalog_path);
        if catalog.is_empty() {
            tracing::warn!(
                path = %config.catalog_path.display(),
                "Catalog is empty, every product query will return no results"
            );
        }

        Self::new(config.clone(), catalog)
    }

    /// 注册后台任务
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        if self.config.refresh_enabled {
            let scheduler = RefreshScheduler::new(
                self.catalog.clone(),
                self.config.refresh_hour_utc,
                tasks.shutdown_token(),
            );
            tasks.spawn("catalog_refresh", TaskKind::Periodic, scheduler.run());
        } else {
            tracing::info!("Daily catalog refresh disabled");
        }

        tasks.log_summary();
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_with_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_overrides(dir.path().join("products.json"), 0);
        let state = ServerState::initialize(&config).await;

        assert!(state.catalog.is_empty());

        let tasks = state.start_background_tasks();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_task_registered_when_enabled() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::with_overrides(dir.path().join("products.json"), 0);
        config.refresh_enabled = true;
        let state = ServerState::initialize(&config).await;

        let tasks = state.start_background_tasks();
        assert_eq!(tasks.len(), 1);
        tasks.shutdown(config.shutdown_timeout()).await;
    }

    #[tokio::test]
    async fn test_dropping_router_releases_state() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_overrides(dir.path().join("products.json"), 0);
        let state = ServerState::initialize(&config).await;
        assert_eq!(state.catalog.share_count(), 1);

        let router = crate::services::build_router(state.clone());
        assert!(state.catalog.share_count() > 1);

        drop(router);
        assert_eq!(state.catalog.share_count(), 1);
    }
}
