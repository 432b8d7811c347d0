//! danmaku-filter - 弹幕过滤反向代理

// 导出全局错误类型
pub use self::error::{DanmakuFilterError, DfResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, GlobalConfig};

// 导出规则模块核心接口
pub use self::rule::{RawRuleFile, Rule, RuleFormat, RuleKind, RuleLoader, RuleParser, RuleSet};

// 导出过滤模块核心接口
pub use self::filter::FilterEngine;

// 导出上游模块核心接口
pub use self::upstream::{SessionToken, UpstreamSession};

// 导出代理模块核心接口
pub use self::proxy::{DanmakuEnvelope, DanmakuRow, FilterReport, PipelineError, ProxyPipeline};

// 声明所有子模块
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod proxy;
pub mod rule;
pub mod server;
pub mod upstream;
