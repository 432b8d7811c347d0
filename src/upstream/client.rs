//! 上游 HTTP 客户端构建

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::Client;

use crate::config::GlobalConfig;
use crate::error::DfResult;

const USER_AGENT: &str = concat!("danmaku-filter/", env!("CARGO_PKG_VERSION"));

/// 上游请求选项
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// 跳过 TLS 证书校验（上游证书不可信时使用）
    pub insecure_tls: bool,
    /// 请求超时，None 表示不限时
    pub timeout: Option<Duration>,
}

impl From<&GlobalConfig> for ClientOptions {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            insecure_tls: config.insecure_tls,
            timeout: config.upstream_timeout,
        }
    }
}

/// 构建上游客户端，传入 jar 时启用独立的 Cookie 存储
pub fn build_client(options: &ClientOptions, jar: Option<Arc<Jar>>) -> DfResult<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(options.insecure_tls);

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(jar) = jar {
        builder = builder.cookie_provider(jar);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let config = crate::config::ConfigManager::custom("https://upstream.example/")
            .insecure_tls(false)
            .upstream_timeout(Some(Duration::from_secs(5)))
            .build()
            .unwrap();

        let options = ClientOptions::from(&config);
        assert!(!options.insecure_tls);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_build_client_with_and_without_jar() {
        let options = ClientOptions {
            insecure_tls: true,
            timeout: None,
        };
        assert!(build_client(&options, None).is_ok());
        assert!(build_client(&options, Some(Arc::new(Jar::default()))).is_ok());
    }
}
