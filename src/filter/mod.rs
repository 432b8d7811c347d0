//! 过滤模块：规则匹配与弹幕保留/屏蔽判定
pub mod matcher;
pub mod engine;

pub use self::matcher::{MatchOutcome, Matcher};
pub use self::engine::FilterEngine;
