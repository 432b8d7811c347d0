//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑

use std::fmt;
use std::path::PathBuf;

/// 规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// 关键词：弹幕包含该子串即屏蔽
    Literal,
    /// 正则：弹幕任意位置匹配即屏蔽
    Pattern,
}

/// 单条屏蔽规则（启动时构建，之后只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub pattern: String,
}

impl Rule {
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Literal,
            pattern: pattern.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Pattern,
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleKind::Literal => write!(f, "keyword:{}", self.pattern),
            RuleKind::Pattern => write!(f, "regex:{}", self.pattern),
        }
    }
}

/// 规则文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// .txt：每行一个关键词
    PlainList,
    /// .xml：`<filters><item enabled="true">r=...</item></filters>`
    StructuredList,
}

impl RuleFormat {
    /// 根据扩展名识别格式，未知扩展名返回 None
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(Self::PlainList),
            "xml" => Some(Self::StructuredList),
            _ => None,
        }
    }
}

/// 单个规则文件的原始内容
#[derive(Debug, Clone)]
pub struct RawRuleFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub format: RuleFormat,
}

/// 完整规则集（保持加载顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// 按类型统计规则数（关键词数, 正则数）
    pub fn count_by_kind(&self) -> (usize, usize) {
        self.rules.iter().fold((0, 0), |(lit, pat), rule| match rule.kind {
            RuleKind::Literal => (lit + 1, pat),
            RuleKind::Pattern => (lit, pat + 1),
        })
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
