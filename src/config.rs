//! 全局配置管理,存储所有可配置项

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{DanmakuFilterError, DfResult};

/// 默认规则目录
pub const DEFAULT_RULES_DIR: &str = "/rules";
/// 默认监听地址
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:1412";
/// 上游会话Cookie名
pub const DEFAULT_COOKIE_NAME: &str = "_ncfa";

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 上游基础地址（仅用于获取会话Cookie）
    pub base_url: Url,
    // 规则目录
    pub rules_dir: PathBuf,
    // 服务监听地址
    pub listen_addr: SocketAddr,
    // 会话Cookie名
    pub cookie_name: String,
    // 是否跳过上游TLS证书校验
    pub insecure_tls: bool,
    // 上游请求超时，None 表示不限时
    pub upstream_timeout: Option<Duration>,
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 自定义配置（base_url 为必填项）
    pub fn custom(base_url: &str) -> CustomConfigBuilder {
        CustomConfigBuilder::new(base_url)
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    base_url: String,
    rules_dir: Option<PathBuf>,
    listen_addr: String,
    cookie_name: String,
    insecure_tls: bool,
    upstream_timeout: Option<Duration>,
}

impl CustomConfigBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            rules_dir: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            insecure_tls: true,
            upstream_timeout: None,
        }
    }

    pub fn rules_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.rules_dir = dir;
        self
    }

    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn insecure_tls(mut self, insecure: bool) -> Self {
        self.insecure_tls = insecure;
        self
    }

    pub fn upstream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// 校验并生成配置
    pub fn build(self) -> DfResult<GlobalConfig> {
        if self.base_url.trim().is_empty() {
            return Err(DanmakuFilterError::ConfigError("BASEURL 未设置".to_string()));
        }
        let base_url = Url::parse(self.base_url.trim())?;

        let rules_dir = match self.rules_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => {
                tracing::warn!(
                    "RULES 未设置或为空，使用默认规则目录：{}",
                    DEFAULT_RULES_DIR
                );
                PathBuf::from(DEFAULT_RULES_DIR)
            }
        };

        let listen_addr = self.listen_addr.parse::<SocketAddr>().map_err(|e| {
            DanmakuFilterError::ConfigError(format!("监听地址无效：{}，{}", self.listen_addr, e))
        })?;

        if self.cookie_name.is_empty() {
            return Err(DanmakuFilterError::ConfigError("Cookie名不能为空".to_string()));
        }

        Ok(GlobalConfig {
            base_url,
            rules_dir,
            listen_addr,
            cookie_name: self.cookie_name,
            insecure_tls: self.insecure_tls,
            upstream_timeout: self.upstream_timeout,
        })
    }
}
