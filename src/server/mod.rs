//! HTTP 服务：启动监听、装配路由、优雅退出

pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::error::{DanmakuFilterError, DfResult};
use crate::filter::FilterEngine;
use crate::proxy::ProxyPipeline;
use crate::rule::RuleSet;

/// 按配置和规则集启动 HTTP 服务，直到收到退出信号
pub async fn start(config: GlobalConfig, rule_set: RuleSet) -> DfResult<()> {
    let engine = Arc::new(FilterEngine::new(&rule_set));
    tracing::info!(rules = engine.rule_count(), "过滤引擎初始化完成");

    let pipeline = Arc::new(ProxyPipeline::new(&config, engine)?);
    let app = router::build(state::AppState::new(pipeline));

    let bind_addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| DanmakuFilterError::ServerError(format!("监听 {bind_addr} 失败：{e}")))?;

    tracing::info!(
        base_url = %config.base_url,
        insecure_tls = config.insecure_tls,
        "服务已启动，监听 {bind_addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DanmakuFilterError::ServerError(format!("服务运行异常：{e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("退出信号监听失败：{e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("收到退出信号，服务关闭");
}
