//! 规则模块：负责规则的加载、解析、数据模型定义
pub mod model;
pub mod loader;
pub mod parser;

// 导出核心接口
pub use self::model::{RawRuleFile, Rule, RuleFormat, RuleKind, RuleSet};
pub use self::loader::RuleLoader;
pub use self::parser::{normalize, RuleParser, EMOJI_SENTINEL};
