//! 路由装配

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{filter_handler, ping_handler};
use super::state::AppState;

/// 装配全部路由，挂载请求追踪中间件
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler).post(ping_handler))
        .route("/filter", get(filter_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
