//! 代理模块：上游弹幕信封模型与过滤流水线
pub mod envelope;
pub mod pipeline;

pub use self::envelope::{DanmakuEnvelope, DanmakuRow, FilterReport};
pub use self::pipeline::{PipelineError, ProxyPipeline};
