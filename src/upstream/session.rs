//! 上游会话：每次请求都通过一次握手重新获取会话 Cookie

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use tracing::debug;
use url::Url;

use super::client::{build_client, ClientOptions};
use crate::error::{DanmakuFilterError, DfResult};

/// 上游会话凭证
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub name: String,
    pub value: String,
}

impl SessionToken {
    /// 生成 Cookie 请求头
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

// 避免凭证值出现在日志中
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("name", &self.name)
            .field("value", &"***")
            .finish()
    }
}

/// 上游会话获取器
pub struct UpstreamSession;

impl UpstreamSession {
    /// 请求 base_url，从独立的 Cookie 存储中取出名为 cookie_name 的 Cookie
    ///
    /// Cookie 按跟随重定向后的最终地址查找。任一环节失败都只影响当前请求。
    pub async fn acquire_token(
        base_url: &Url,
        cookie_name: &str,
        options: &ClientOptions,
    ) -> DfResult<SessionToken> {
        let jar = Arc::new(Jar::default());
        let client = build_client(options, Some(jar.clone()))?;

        let response = client.get(base_url.clone()).send().await?;
        let final_url = response.url().clone();
        debug!(status = %response.status(), url = %final_url, "会话握手完成");
        response.bytes().await?;

        let cookies = jar
            .cookies(&final_url)
            .and_then(|header| header.to_str().ok().map(str::to_string))
            .unwrap_or_default();

        find_cookie(&cookies, cookie_name)
            .map(|value| SessionToken {
                name: cookie_name.to_string(),
                value,
            })
            .ok_or_else(|| DanmakuFilterError::CookieNotFound(cookie_name.to_string()))
    }
}

/// 从 `a=1; b=2` 形式的 Cookie 头中查找指定名称的值
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
