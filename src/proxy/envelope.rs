//! 上游弹幕响应模型
//! `{"code": <int>, "data": [[...], ...]}`，每行只解读下标 4 的弹幕文本，其余字段原样透传

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{DanmakuFilterError, DfResult};
use crate::filter::FilterEngine;

/// 单条弹幕（异构字段数组）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DanmakuRow(pub Vec<Value>);

impl DanmakuRow {
    /// 弹幕文本所在下标
    pub const COMMENT_INDEX: usize = 4;

    /// 弹幕文本
    pub fn comment(&self) -> Option<&str> {
        self.0.get(Self::COMMENT_INDEX).and_then(Value::as_str)
    }
}

/// 弹幕响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanmakuEnvelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<DanmakuRow>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DanmakuRow>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DanmakuRow>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 过滤结果
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    pub envelope: DanmakuEnvelope,
    pub source_count: usize,
}

impl FilterReport {
    /// 被屏蔽的弹幕数
    pub fn removed_count(&self) -> usize {
        self.source_count - self.envelope.data.len()
    }
}

impl DanmakuEnvelope {
    /// 解析上游响应体，任一行缺少文本字段视为解析失败
    pub fn from_slice(body: &[u8]) -> DfResult<Self> {
        let envelope: DanmakuEnvelope = serde_json::from_slice(body)?;
        if let Some(index) = envelope.data.iter().position(|row| row.comment().is_none()) {
            return Err(DanmakuFilterError::MalformedRow(index));
        }
        Ok(envelope)
    }

    /// 逐条过滤，保留原有顺序与 code
    pub fn filter(self, engine: &FilterEngine) -> FilterReport {
        let source_count = self.data.len();
        let data = self
            .data
            .into_iter()
            .filter(|row| {
                let comment = row.comment().unwrap_or_default();
                let keep = engine.should_keep(comment);
                if !keep {
                    info!("屏蔽弹幕：{}", comment);
                }
                keep
            })
            .collect();

        let report = FilterReport {
            envelope: DanmakuEnvelope {
                code: self.code,
                data,
            },
            source_count,
        };

        info!(
            "原始弹幕：{}，过滤后弹幕：{}",
            report.source_count,
            report.envelope.data.len()
        );
        info!("共屏蔽 {} 条弹幕", report.removed_count());

        report
    }
}
