//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::catalog::{CatalogPage, QuerySpec, SortKey, evaluate_page};
use shared::models::{CategoryFilter, Product, ProductCard};

use crate::api::parse_param;
use crate::catalog::run_refresh;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

// =============================================================================
// Response / Query types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    products: Vec<ProductCard>,
    count: usize,
    last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProductsResponse {
    category: CategoryFilter,
    products: Vec<ProductCard>,
    count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    products: Vec<ProductCard>,
    total: usize,
    shown: usize,
    page: u32,
    page_size: usize,
    has_more: bool,
    /// 实际执行的查询规格
    query: QuerySpec,
}

impl SearchResponse {
    fn new(page: CatalogPage, query: QuerySpec) -> Self {
        Self {
            products: cards(page.products),
            total: page.total,
            shown: page.shown,
            page: page.page,
            page_size: page.page_size,
            has_more: page.has_more,
            query,
        }
    }
}

fn cards(products: impl IntoIterator<Item = Product>) -> Vec<ProductCard> {
    products.into_iter().map(ProductCard::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    count: usize,
    last_updated: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendingParams {
    limit: Option<String>,
}

/// 参数均以字符串接收，解析失败返回统一的 400 响应
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    q: Option<String>,
    category: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    sort: Option<String>,
    page: Option<String>,
}

impl SearchParams {
    fn to_spec(&self) -> AppResult<QuerySpec> {
        let category = match self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(id) => id
                .parse::<CategoryFilter>()
                .map_err(|e| AppError::unknown_category(e.0))?,
            None => CategoryFilter::All,
        };
        let min = parse_param::<f64>("minPrice", self.min_price.as_deref())?;
        let max = parse_param::<f64>("maxPrice", self.max_price.as_deref())?;
        let page = parse_param::<u32>("page", self.page.as_deref())?.unwrap_or(1);
        let sort = self
            .sort
            .as_deref()
            .map(SortKey::parse_lenient)
            .unwrap_or_default();

        // 分类切换会清空搜索，必须先设置分类
        Ok(QuerySpec::new()
            .with_category(category)
            .with_search(self.q.clone().unwrap_or_default())
            .with_price_range(min, max)
            .with_sort(sort)
            .at_page(page))
    }
}

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<ProductListResponse>>> {
    let snapshot = state.catalog.snapshot();
    ok(ProductListResponse {
        count: snapshot.products.len(),
        products: snapshot.products.iter().map(ProductCard::from).collect(),
        last_updated: snapshot.last_updated,
    })
}

/// GET /api/products/category/{category} - 按分类获取商品 ("all" 返回全部)
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryProductsResponse>>> {
    let filter: CategoryFilter = category
        .parse()
        .map_err(|_| AppError::unknown_category(&category))?;
    let products = state.catalog.by_category(filter);
    ok(CategoryProductsResponse {
        category: filter,
        count: products.len(),
        products: cards(products),
    })
}

/// GET /api/products/trending?limit=N - 按订单数降序
pub async fn trending(
    State(state): State<ServerState>,
    Query(params): Query<TrendingParams>,
) -> AppResult<Json<ApiResponse<Vec<ProductCard>>>> {
    let limit = parse_param::<usize>("limit", params.limit.as_deref())?
        .filter(|&n| n > 0)
        .unwrap_or(state.config.trending_limit);
    ok(cards(state.catalog.trending(limit)))
}

/// GET /api/products/search - 执行查询管线
///
/// 没有搜索词且没有其他过滤条件时返回空页。
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<SearchResponse>>> {
    let spec = params.to_spec()?;
    let page_size = state.config.page_size;

    let page = if spec.has_filters() {
        let products = state.catalog.load_all();
        evaluate_page(&products, &spec, page_size)
    } else {
        CatalogPage {
            products: Vec::new(),
            total: 0,
            shown: 0,
            page: spec.page(),
            page_size,
            has_more: false,
        }
    };

    tracing::debug!(
        query = ?spec.search_term(),
        category = %spec.category(),
        total = page.total,
        shown = page.shown,
        "Product search"
    );
    ok(SearchResponse::new(page, spec))
}

/// GET /api/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductCard>>> {
    let product = state
        .catalog
        .find_by_id(&id)
        .ok_or_else(|| AppError::product_not_found(&id))?;
    ok(ProductCard::from(product))
}

/// POST /api/products/update - 立即执行一次刷新
pub async fn update(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<UpdateResponse>>> {
    tracing::info!("Manual product update requested");
    let snapshot = run_refresh(&state.catalog).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Products updated successfully",
        UpdateResponse {
            count: snapshot.products.len(),
            last_updated: snapshot.last_updated,
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let mut p = SearchParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "q" => p.q = v,
                "category" => p.category = v,
                "minPrice" => p.min_price = v,
                "maxPrice" => p.max_price = v,
                "sort" => p.sort = v,
                "page" => p.page = v,
                _ => unreachable!(),
            }
        }
        p
    }

    #[test]
    fn test_to_spec_defaults() {
        let spec = SearchParams::default().to_spec().unwrap();
        assert_eq!(spec, QuerySpec::new());
        assert!(!spec.has_filters());
    }

    #[test]
    fn test_to_spec_keeps_search_with_category() {
        let spec = params(&[("q", " Watch "), ("category", "electronics"), ("page", "3")])
            .to_spec()
            .unwrap();
        assert_eq!(spec.category(), CategoryFilter::Only(Category::Electronics));
        assert_eq!(spec.search_term(), Some("Watch"));
        assert_eq!(spec.page(), 3);
    }

    #[test]
    fn test_to_spec_lenient_sort_and_page() {
        let spec = params(&[("sort", "cheapest"), ("page", "0")]).to_spec().unwrap();
        assert_eq!(spec.sort(), SortKey::Popular);
        assert_eq!(spec.page(), 1);
    }

    #[test]
    fn test_to_spec_rejects_bad_input() {
        assert!(params(&[("category", "garden")]).to_spec().is_err());
        assert!(params(&[("minPrice", "cheap")]).to_spec().is_err());
        assert!(params(&[("page", "-1")]).to_spec().is_err());
    }
}
