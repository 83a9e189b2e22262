//! Catalog refresh job
//!
//! 模拟每日行情变化：订单数随机增长，价格在 ±5% 内浮动。
//! 由 [`RefreshScheduler`] 每天在配置的 UTC 小时触发，也可通过
//! `POST /api/products/update` 手动触发。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use shared::catalog::money;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Product;
use tokio_util::sync::CancellationToken;

use super::store::{CatalogSnapshot, CatalogStore};

/// 每次刷新订单数增量上限 (不含)
const MAX_ORDER_INCREMENT: u64 = 100;
/// 价格系数 = (9500 + n) / 10000, n ∈ [0, 1000] => [0.95, 1.05]
const FACTOR_BASE_BPS: i64 = 9500;
const FACTOR_SPREAD_BPS: i64 = 1000;

/// 对单个商品应用一次随机扰动
///
/// 只修改 `orders` 和 `price`，其余字段原样保留。
pub fn perturb<R: Rng>(product: &Product, rng: &mut R) -> Product {
    let increment = rng.gen_range(0..MAX_ORDER_INCREMENT);
    let factor = Decimal::new(FACTOR_BASE_BPS + rng.gen_range(0..=FACTOR_SPREAD_BPS), 4);

    Product {
        orders: product.orders.saturating_add(increment),
        price: money::scale_price(product.price, factor),
        ..product.clone()
    }
}

/// 在阻塞线程池上执行一次完整刷新
pub async fn run_refresh(store: &CatalogStore) -> AppResult<Arc<CatalogSnapshot>> {
    let store = store.clone();
    tokio::task::spawn_blocking(move || {
        let mut rng = rand::thread_rng();
        store.refresh(|p| perturb(p, &mut rng))
    })
    .await
    .map_err(|e| {
        AppError::with_message(
            ErrorCode::CatalogRefreshFailed,
            format!("Refresh task aborted: {}", e),
        )
    })?
}

/// 距离下一个 `hour:00 UTC` 的时长
///
/// 正好处于触发点时返回一整天，避免同一时刻重复触发。
pub fn duration_until_next(now: DateTime<Utc>, hour: u32) -> Duration {
    let trigger = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive();

    let target_date = if now.time() >= trigger {
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    } else {
        today
    };
    let target = target_date.and_time(trigger).and_utc();

    target
        .signed_duration_since(now)
        .to_std()
        .unwrap_or(Duration::from_secs(60))
}

/// 每日刷新调度器
///
/// 注册为 `TaskKind::Periodic`。
pub struct RefreshScheduler {
    store: CatalogStore,
    hour_utc: u32,
    shutdown: CancellationToken,
}

impl RefreshScheduler {
    pub fn new(store: CatalogStore, hour_utc: u32, shutdown: CancellationToken) -> Self {
        Self {
            store,
            hour_utc,
            shutdown,
        }
    }

    pub async fn run(self) {
        tracing::info!(hour_utc = self.hour_utc, "Catalog refresh scheduler started");

        loop {
            let sleep_duration = duration_until_next(Utc::now(), self.hour_utc);
            tracing::info!(
                "Next catalog refresh in {} minutes",
                sleep_duration.as_secs() / 60
            );

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Catalog refresh scheduler received shutdown signal");
                    break;
                }
            }

            tracing::info!("Running scheduled product update");
            match run_refresh(&self.store).await {
                Ok(snapshot) => tracing::info!(
                    count = snapshot.products.len(),
                    last_updated = %snapshot.last_updated.to_rfc3339(),
                    "Scheduled product update complete"
                ),
                // 失败时保留旧目录，等待下一次触发
                Err(e) => tracing::error!(error = %e, "Scheduled product update failed"),
            }
        }

        tracing::info!("Catalog refresh scheduler stopped");
    }
}
