//! 请求处理器

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use url::form_urlencoded;

use super::state::AppState;

/// GET|POST /ping
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// GET /filter?id=<url> - 拉取上游弹幕并按规则过滤
///
/// 任何失败都以 200 + 纯文本返回，调用方按文本区分失败阶段。
/// 查询串只做宽松解析：重复的 id 取第一个，缺失时为空串。
pub async fn filter_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let target = first_param(query.as_deref(), "id");

    match state.pipeline.run(&target).await {
        Ok(report) => Json(report.envelope).into_response(),
        Err(e) => {
            tracing::error!(url = %target, "{e}");
            (StatusCode::OK, e.body()).into_response()
        }
    }
}

/// 取查询串中第一个同名参数的解码值
fn first_param(query: Option<&str>, name: &str) -> String {
    query
        .and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}
