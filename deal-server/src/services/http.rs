use crate::core::ServerState;
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::products::router())
        .merge(crate::api::categories::router())
}

/// 绑定状态并挂载中间件
///
/// 配置了 `STATIC_DIR` 时，未匹配的路径由静态目录处理，找不到文件则返回
/// `index.html` (前端单页应用)。
pub fn build_router(state: ServerState) -> Router {
    let config = state.config.clone();
    let mut app = build_app().with_state(state);

    if let Some(dir) = &config.static_dir {
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    app.layer(TimeoutLayer::with_status_code(
        http::StatusCode::REQUEST_TIMEOUT,
        config.request_timeout(),
    ))
    .layer(CorsLayer::permissive())
    .layer(CompressionLayer::new())
    .layer(middleware::from_fn(log_request))
}

/// 绑定端口并启动 HTTP 服务，`shutdown_signal` 完成后停止接受新连接
pub async fn serve<F>(port: u16, app: Router, shutdown_signal: F) -> crate::core::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| crate::core::ServerError::Bind { port, source })?;

    tracing::info!("🚀 Starting HTTP server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(crate::core::ServerError::Serve)?;

    Ok(())
}
