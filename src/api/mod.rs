pub mod handlers;

pub use handlers::*;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::time::Instant;
use tower::ServiceBuilder;

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/debts", get(supplier_debts))
        .route("/api/debts/export", get(export_csv))
        .route("/api/debts/report", get(report_page))
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_request)))
        .with_state(state)
}

/// 请求日志: 方法, 路径, 状态码, 耗时
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!("{} {} -> {} ({:?})", method, uri, response.status(), start.elapsed());
    response
}
