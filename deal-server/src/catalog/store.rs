//! Catalog Store - flat JSON file + in-memory snapshot
//!
//! File format (same as the storefront's cache file):
//!
//! ```json
//! { "products": [ ... ], "lastUpdated": "2026-10-18T00:00:00Z" }
//! ```
//!
//! Readers take an `Arc` of the current [`CatalogSnapshot`]; writers build a
//! complete new snapshot, persist it, then swap the pointer. A reader never
//! sees a partially refreshed list.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryFilter, CategorySummary, Product};

/// 商品列表快照 (整体替换，不做局部更新)
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Arc<[Product]>,
    pub last_updated: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn empty() -> Self {
        Self {
            products: Arc::from(Vec::new()),
            last_updated: Utc::now(),
        }
    }
}

/// 缓存文件结构
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// 商品目录存储
///
/// Clone 为浅拷贝，所有副本共享同一份快照。
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: Arc<PathBuf>,
    current: Arc<RwLock<Arc<CatalogSnapshot>>>,
    /// 串行化写入，避免两次刷新基于同一份旧数据
    write_lock: Arc<Mutex<()>>,
}

impl CatalogStore {
    /// 打开缓存文件
    ///
    /// 文件不存在或无法解析时记录错误并以空目录启动。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = match read_file(&path) {
            Ok(snapshot) => {
                tracing::info!(
                    count = snapshot.products.len(),
                    path = %path.display(),
                    "Loaded products from cache"
                );
                snapshot
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load products, starting with an empty catalog"
                );
                CatalogSnapshot::empty()
            }
        };

        warn_price_anomalies(&snapshot.products);

        Self {
            path: Arc::new(path),
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 当前快照
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.read().clone()
    }

    /// 全部商品 (共享只读)
    pub fn load_all(&self) -> Arc<[Product]> {
        self.snapshot().products.clone()
    }

    /// 最后刷新时间
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.snapshot().last_updated
    }

    pub fn len(&self) -> usize {
        self.snapshot().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.snapshot().products.iter().find(|p| p.id == id).cloned()
    }

    /// 按分类获取商品 (`All` 返回全部)
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<Product> {
        self.snapshot()
            .products
            .iter()
            .filter(|p| filter.matches(p.category))
            .cloned()
            .collect()
    }

    /// 按订单数降序取前 `limit` 个
    pub fn trending(&self, limit: usize) -> Vec<Product> {
        let mut products = self.snapshot().products.to_vec();
        products.sort_by(|a, b| b.orders.cmp(&a.orders));
        products.truncate(limit);
        products
    }

    /// "all" + 每个分类的商品数
    pub fn category_counts(&self) -> Vec<CategorySummary> {
        let snapshot = self.snapshot();
        let count_of = |category: Category| {
            snapshot
                .products
                .iter()
                .filter(|p| p.category == category)
                .count()
        };

        let mut summaries = Vec::with_capacity(Category::ALL.len() + 1);
        summaries.push(CategorySummary {
            id: CategoryFilter::ALL_ID.to_string(),
            name: "All Products".to_string(),
            icon: "fa-th-large".to_string(),
            count: snapshot.products.len(),
        });
        summaries.extend(Category::ALL.into_iter().map(|category| CategorySummary {
            id: category.id().to_string(),
            name: category.display_name().to_string(),
            icon: category.icon().to_string(),
            count: count_of(category),
        }));
        summaries
    }

    /// 整体替换商品列表并持久化
    ///
    /// 先写文件再切换快照：写入失败时内存中的目录保持不变。
    pub fn save(&self, products: Vec<Product>) -> AppResult<Arc<CatalogSnapshot>> {
        let _guard = self.write_lock.lock();
        self.persist_and_swap(products)
    }

    /// 对每个商品应用 `perturbation`，生成新的完整列表后原子替换
    pub fn refresh<F>(&self, perturbation: F) -> AppResult<Arc<CatalogSnapshot>>
    where
        F: FnMut(&Product) -> Product,
    {
        let _guard = self.write_lock.lock();
        let current = self.snapshot();
        let updated: Vec<Product> = current.products.iter().map(perturbation).collect();
        self.persist_and_swap(updated)
    }

    fn persist_and_swap(&self, products: Vec<Product>) -> AppResult<Arc<CatalogSnapshot>> {
        validate_prices(&products)?;
        let snapshot = Arc::new(CatalogSnapshot {
            products: Arc::from(products),
            last_updated: Utc::now(),
        });

        write_file(&self.path, &snapshot)?;
        *self.current.write() = snapshot.clone();

        tracing::info!(
            count = snapshot.products.len(),
            last_updated = %snapshot.last_updated.to_rfc3339(),
            "Saved products to cache"
        );
        Ok(snapshot)
    }

    #[cfg(test)]
    pub(crate) fn share_count(&self) -> usize {
        Arc::strong_count(&self.current)
    }
}

fn read_file(path: &Path) -> AppResult<CatalogSnapshot> {
    let data = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::storage(format!("Catalog file not found: {}", path.display())),
        _ => AppError::storage(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let file: CatalogFile = serde_json::from_str(&data).map_err(|e| {
        AppError::with_message(
            ErrorCode::StorageCorrupted,
            format!("Failed to parse {}: {}", path.display(), e),
        )
    })?;
    validate_prices(&file.products)?;

    Ok(CatalogSnapshot {
        products: Arc::from(file.products),
        last_updated: file.last_updated.unwrap_or_else(Utc::now),
    })
}

/// 写入临时文件后 rename，磁盘上的文件同样不会出现半写状态
fn write_file(path: &Path, snapshot: &CatalogSnapshot) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::storage(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let file = CatalogFile {
        products: snapshot.products.to_vec(),
        last_updated: Some(snapshot.last_updated),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| AppError::internal(format!("Failed to serialize catalog: {}", e)))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .map_err(|e| AppError::storage(format!("Failed to write {}: {}", tmp_path.display(), e)))?;
    fs::rename(&tmp_path, path)
        .map_err(|e| AppError::storage(format!("Failed to replace {}: {}", path.display(), e)))?;

    Ok(())
}

/// 价格必须是有限的非负数，否则整份目录都不可用
fn validate_prices(products: &[Product]) -> AppResult<()> {
    let invalid = |price: f64| !price.is_finite() || price < 0.0;
    match products
        .iter()
        .find(|p| invalid(p.price) || p.original_price.is_some_and(invalid))
    {
        Some(product) => Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Product {} has an invalid price", product.id),
        )
        .with_detail("id", product.id.as_str())
        .with_detail("price", product.price)),
        None => Ok(()),
    }
}

fn warn_price_anomalies(products: &[Product]) {
    for product in products.iter().filter(|p| p.has_price_anomaly()) {
        tracing::warn!(
            id = %product.id,
            price = product.price,
            original_price = ?product.original_price,
            "originalPrice is lower than price, discount will be shown as 0"
        );
    }
}
