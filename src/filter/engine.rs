//! 过滤引擎：对单条弹幕按规则集判定保留或屏蔽

use tracing::debug;

use super::matcher::{MatchOutcome, Matcher};
use crate::rule::RuleSet;

/// 过滤引擎（启动时构建，所有请求共享只读）
#[derive(Debug)]
pub struct FilterEngine {
    matchers: Vec<Matcher>,
}

impl FilterEngine {
    pub fn new(rule_set: &RuleSet) -> Self {
        let matchers = rule_set.iter().map(Matcher::from_rule).collect();
        Self { matchers }
    }

    /// 规则总数
    pub fn rule_count(&self) -> usize {
        self.matchers.len()
    }

    /// 判断弹幕是否保留
    ///
    /// 按加载顺序逐条求值，任一规则命中（或正则无法编译）即返回 false。
    pub fn should_keep(&self, comment: &str) -> bool {
        for matcher in &self.matchers {
            let outcome = matcher.evaluate(comment);
            if outcome.blocks() {
                if outcome == MatchOutcome::Hit {
                    debug!(rule = matcher.describe(), "弹幕命中规则");
                }
                return false;
            }
        }
        true
    }
}
