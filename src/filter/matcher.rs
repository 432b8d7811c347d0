//! 规则匹配器
//! 关键词做子串匹配；正则在首次使用时编译，编译结果（含失败）按规则缓存

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::rule::{Rule, RuleKind};

/// 单条规则的匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// 未命中
    Miss,
    /// 命中
    Hit,
    /// 正则无法编译，按命中处理
    Invalid,
}

impl MatchOutcome {
    /// 是否应当屏蔽
    pub fn blocks(self) -> bool {
        !matches!(self, MatchOutcome::Miss)
    }
}

#[derive(Debug)]
pub enum Matcher {
    Contains(String), // 子串匹配（区分大小写）
    Regex {
        source: String,
        compiled: OnceCell<Result<Regex, regex::Error>>,
    }, // 正则匹配
}

impl Matcher {
    pub fn from_rule(rule: &Rule) -> Self {
        match rule.kind {
            RuleKind::Literal => Matcher::Contains(rule.pattern.clone()),
            RuleKind::Pattern => Matcher::Regex {
                source: rule.pattern.clone(),
                compiled: OnceCell::new(),
            },
        }
    }

    /// 对一条弹幕求值
    pub fn evaluate(&self, input: &str) -> MatchOutcome {
        match self {
            Matcher::Contains(s) => {
                if input.contains(s.as_str()) {
                    MatchOutcome::Hit
                } else {
                    MatchOutcome::Miss
                }
            }
            Matcher::Regex { source, compiled } => {
                match compiled.get_or_init(|| Regex::new(source)) {
                    Ok(regex) if regex.is_match(input) => MatchOutcome::Hit,
                    Ok(_) => MatchOutcome::Miss,
                    Err(e) => {
                        tracing::error!(error = %e, "正则编译失败：{}", source);
                        MatchOutcome::Invalid
                    }
                }
            }
        }
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        match self {
            Matcher::Contains(s) => s.as_str(),
            Matcher::Regex { source, .. } => source.as_str(),
        }
    }
}
