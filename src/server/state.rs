//! 共享状态

use std::sync::Arc;

use crate::proxy::ProxyPipeline;

/// 所有请求处理器共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ProxyPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<ProxyPipeline>) -> Self {
        Self { pipeline }
    }
}
