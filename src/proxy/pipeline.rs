//! 代理流水线：获取会话 → 拉取上游弹幕 → 解析 → 过滤

use std::sync::Arc;

use reqwest::header::COOKIE;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::envelope::{DanmakuEnvelope, FilterReport};
use crate::config::GlobalConfig;
use crate::error::{DanmakuFilterError, DfResult};
use crate::filter::FilterEngine;
use crate::upstream::{build_client, ClientOptions, UpstreamSession};

/// 单次请求内的失败阶段
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("获取会话失败：{0}")]
    Session(#[source] DanmakuFilterError),
    #[error("拉取弹幕失败：{0}")]
    Fetch(#[source] reqwest::Error),
    #[error("读取弹幕失败：{0}")]
    Read(#[source] reqwest::Error),
    #[error("解析弹幕失败：{0}")]
    Parse(#[source] DanmakuFilterError),
}

impl PipelineError {
    /// 返回给调用方的纯文本
    pub fn body(&self) -> &'static str {
        match self {
            PipelineError::Session(_) => "failed to authenticate",
            PipelineError::Fetch(_) => "failed to fetch",
            PipelineError::Read(_) => "failed to read",
            PipelineError::Parse(_) => "failed to parse",
        }
    }
}

/// 代理流水线（各请求共享，无可变状态）
pub struct ProxyPipeline {
    engine: Arc<FilterEngine>,
    client: Client,
    base_url: Url,
    cookie_name: String,
    options: ClientOptions,
}

impl ProxyPipeline {
    pub fn new(config: &GlobalConfig, engine: Arc<FilterEngine>) -> DfResult<Self> {
        let options = ClientOptions::from(config);
        let client = build_client(&options, None)?;

        Ok(Self {
            engine,
            client,
            base_url: config.base_url.clone(),
            cookie_name: config.cookie_name.clone(),
            options,
        })
    }

    /// 处理一次过滤请求，url 为上游弹幕地址
    pub async fn run(&self, url: &str) -> Result<FilterReport, PipelineError> {
        let token = UpstreamSession::acquire_token(&self.base_url, &self.cookie_name, &self.options)
            .await
            .map_err(PipelineError::Session)?;

        let response = self
            .client
            .get(url)
            .header(COOKIE, token.cookie_header())
            .send()
            .await
            .map_err(PipelineError::Fetch)?;

        let body = response.bytes().await.map_err(PipelineError::Read)?;

        let envelope = DanmakuEnvelope::from_slice(&body).map_err(PipelineError::Parse)?;

        Ok(envelope.filter(&self.engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleSet;

    #[test]
    fn test_error_bodies_are_distinct() {
        let session = PipelineError::Session(DanmakuFilterError::CookieNotFound("_ncfa".into()));
        let parse = PipelineError::Parse(DanmakuFilterError::MalformedRow(0));
        assert_eq!(session.body(), "failed to authenticate");
        assert_eq!(parse.body(), "failed to parse");
    }

    #[tokio::test]
    async fn test_run_reports_session_failure() {
        let config = crate::config::ConfigManager::custom("http://127.0.0.1:1/")
            .build()
            .unwrap();
        let engine = Arc::new(FilterEngine::new(&RuleSet::default()));
        let pipeline = ProxyPipeline::new(&config, engine).unwrap();

        let err = pipeline.run("http://127.0.0.1:1/danmaku").await.unwrap_err();
        assert!(matches!(err, PipelineError::Session(_)));
    }
}
