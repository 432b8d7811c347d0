//! 命令行参数，每个参数均可由同名环境变量提供

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::{ConfigManager, GlobalConfig, DEFAULT_COOKIE_NAME, DEFAULT_LISTEN_ADDR};
use crate::error::DfResult;

#[derive(Debug, Parser)]
#[command(name = "danmaku-filter", version, about = "弹幕过滤反向代理")]
pub struct Cli {
    /// 上游基础地址，仅用于获取会话 Cookie
    #[arg(long, env = "BASEURL")]
    pub base_url: String,

    /// 规则目录（默认 /rules）
    #[arg(long, env = "RULES")]
    pub rules: Option<PathBuf>,

    /// 监听地址
    #[arg(long, env = "LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// 会话 Cookie 名
    #[arg(long, env = "COOKIE_NAME", default_value = DEFAULT_COOKIE_NAME)]
    pub cookie_name: String,

    /// 跳过上游 TLS 证书校验
    #[arg(long, env = "INSECURE_TLS", default_value_t = true, action = ArgAction::Set)]
    pub insecure_tls: bool,

    /// 上游请求超时（秒），不设置则不限时
    #[arg(long, env = "UPSTREAM_TIMEOUT")]
    pub upstream_timeout: Option<u64>,
}

impl Cli {
    pub fn into_config(self) -> DfResult<GlobalConfig> {
        ConfigManager::custom(&self.base_url)
            .rules_dir(self.rules)
            .listen_addr(self.listen)
            .cookie_name(self.cookie_name)
            .insecure_tls(self.insecure_tls)
            .upstream_timeout(self.upstream_timeout.map(Duration::from_secs))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_into_config() {
        let cli = Cli::try_parse_from([
            "danmaku-filter",
            "--base-url",
            "https://upstream.example/",
            "--rules",
            "/tmp/rules",
            "--listen",
            "127.0.0.1:8080",
            "--insecure-tls",
            "false",
            "--upstream-timeout",
            "10",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.base_url.as_str(), "https://upstream.example/");
        assert_eq!(config.rules_dir, PathBuf::from("/tmp/rules"));
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
        assert!(!config.insecure_tls);
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["danmaku-filter", "--base-url", "https://upstream.example/"])
            .unwrap();
        assert_eq!(cli.listen, DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.cookie_name, DEFAULT_COOKIE_NAME);
        assert!(cli.insecure_tls);
        assert!(cli.upstream_timeout.is_none());
    }
}
