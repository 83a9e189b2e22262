//! HTTP API 集成测试
//!
//! 直接在进程内调用路由，目录文件放在临时目录中。

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use deal_server::services::build_router;
use deal_server::{Config, ServerState};

fn fixture() -> Value {
    let products: Vec<Value> = (1..=20)
        .map(|i| {
            let category = match i % 4 {
                0 => "electronics",
                1 => "fashion",
                2 => "home",
                _ => "sports",
            };
            json!({
                "id": format!("prod-{:03}", i),
                "title": if i == 7 { "Smart Watch Pro".to_string() } else { format!("Gadget {}", i) },
                "price": 5.0 * i as f64,
                "originalPrice": 10.0 * i as f64,
                "category": category,
                "rating": 4.0 + (i % 10) as f64 / 10.0,
                "reviews": 100 * i,
                "orders": 1000 * i,
                "isNew": i % 5 == 0,
                "link": "https://www.aliexpress.com"
            })
        })
        .collect();
    json!({ "products": products, "lastUpdated": "2026-10-01T00:00:00Z" })
}

async fn setup() -> (TempDir, axum::Router, ServerState) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, serde_json::to_string(&fixture()).unwrap()).unwrap();

    let config = Config::with_overrides(&path, 0);
    let state = ServerState::initialize(&config).await;
    let router = build_router(state.clone());
    (dir, router, state)
}

async fn send(router: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri).await
}

fn ids(products: &Value) -> Vec<String> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_products() {
    let (_dir, router, _) = setup().await;
    let (status, body) = get(&router, "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["count"], 20);
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 20);
    assert!(body["data"]["lastUpdated"].as_str().unwrap().starts_with("2026-10-01"));
    assert_eq!(body["data"]["products"][0]["originalPrice"], 10.0);
    assert_eq!(body["data"]["products"][0]["discountPercent"], 50);
}

#[tokio::test]
async fn test_products_by_category() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/category/electronics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 5);
    for product in body["data"]["products"].as_array().unwrap() {
        assert_eq!(product["category"], "electronics");
    }

    let (_, body) = get(&router, "/api/products/category/all").await;
    assert_eq!(body["data"]["count"], 20);

    let (status, body) = get(&router, "/api/products/category/garden").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6101);
}

#[tokio::test]
async fn test_trending() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/trending?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), vec!["prod-020", "prod-019", "prod-018"]);
    assert_eq!(body["data"][0]["discountPercent"], 50);

    let (_, body) = get(&router, "/api/products/trending").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let (status, _) = get(&router, "/api/products/trending?limit=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_by_title() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/search?q=WATCH").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["products"]), vec!["prod-007"]);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["hasMore"], false);
    assert_eq!(body["data"]["query"]["search"], "WATCH");
    assert_eq!(body["data"]["products"][0]["discountPercent"], 50);
}

#[tokio::test]
async fn test_search_blank_query_returns_empty_page() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/search?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    assert!(body["data"]["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_filters_sort_and_pages() {
    let (_dir, router, _) = setup().await;

    // Prices are 5.0 * i; [20, 80] keeps i = 4..=16
    let uri = "/api/products/search?minPrice=20&maxPrice=80&sort=price-low";
    let (_, body) = get(&router, uri).await;
    assert_eq!(body["data"]["total"], 13);
    assert_eq!(body["data"]["shown"], 12);
    assert_eq!(body["data"]["hasMore"], true);

    let prices: Vec<f64> = body["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices.first(), Some(&20.0));
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    let (_, body) = get(&router, &format!("{}&page=2", uri)).await;
    assert_eq!(body["data"]["shown"], 13);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["hasMore"], false);
}

#[tokio::test]
async fn test_search_with_category_and_unknown_sort() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/search?category=fashion&sort=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["query"]["sort"], "popular");
    assert_eq!(
        ids(&body["data"]["products"]),
        vec!["prod-017", "prod-013", "prod-009", "prod-005", "prod-001"]
    );
}

#[tokio::test]
async fn test_search_rejects_bad_price() {
    let (_dir, router, _) = setup().await;
    let (status, body) = get(&router, "/api/products/search?q=gadget&minPrice=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["param"], "minPrice");
}

#[tokio::test]
async fn test_get_product_by_id() {
    let (_dir, router, _) = setup().await;

    let (status, body) = get(&router, "/api/products/prod-007").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Smart Watch Pro");
    assert_eq!(body["data"]["discountPercent"], 50);

    let (status, body) = get(&router, "/api/products/prod-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_manual_update_persists() {
    let (dir, router, state) = setup().await;
    let before = state.catalog.load_all();

    let (status, body) = send(&router, "POST", "/api/products/update").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 20);

    let after = state.catalog.load_all();
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        assert!(new.orders >= old.orders && new.orders < old.orders + 100);
        assert!(new.price >= (old.price * 0.95 * 100.0).floor() / 100.0);
        assert!(new.price <= (old.price * 1.05 * 100.0).ceil() / 100.0);
    }
    assert_ne!(state.catalog.last_updated().to_rfc3339(), "2026-10-01T00:00:00+00:00");

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("products.json")).unwrap()).unwrap();
    assert_eq!(saved["products"][0]["orders"].as_u64(), Some(after[0].orders));
}

#[tokio::test]
async fn test_categories() {
    let (_dir, router, _) = setup().await;
    let (status, body) = get(&router, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);

    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 9);
    assert_eq!(categories[0]["id"], "all");
    assert_eq!(categories[0]["count"], 20);

    let electronics = categories.iter().find(|c| c["id"] == "electronics").unwrap();
    assert_eq!(electronics["count"], 5);
    assert_eq!(electronics["icon"], "fa-laptop");

    let toys = categories.iter().find(|c| c["id"] == "toys").unwrap();
    assert_eq!(toys["count"], 0);
}

#[tokio::test]
async fn test_health() {
    let (_dir, router, _) = setup().await;
    let (status, body) = get(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["productCount"], 20);
    assert!(body["data"]["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_corrupt_catalog_serves_empty_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, "{{{").unwrap();

    let state = ServerState::initialize(&Config::with_overrides(&path, 0)).await;
    let router = build_router(state);

    let (status, body) = get(&router, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_static_fallback_serves_index() {
    let dir = TempDir::new().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir(&public).unwrap();
    std::fs::write(public.join("index.html"), "<html>deals</html>").unwrap();

    let mut config = Config::with_overrides(dir.path().join("products.json"), 0);
    config.static_dir = Some(public);
    let state = ServerState::initialize(&config).await;
    let router = build_router(state);

    let request = Request::builder()
        .uri("/wishlist")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>deals</html>");
}
