//! 规则加载器
//! 负责遍历规则目录，读取规则文件并按扩展名分类

use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::model::{RawRuleFile, RuleFormat};
use crate::error::{DanmakuFilterError, DfResult};

/// 规则加载器
pub struct RuleLoader;

impl RuleLoader {
    /// 递归读取规则目录下的所有文件
    ///
    /// 未知扩展名的文件仅告警跳过；任何遍历或读取错误都直接返回，
    /// 调用方应视为启动失败，不得带着残缺规则继续运行。
    /// 返回顺序不作保证。
    pub fn load(rules_dir: &Path) -> DfResult<Vec<RawRuleFile>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(rules_dir) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(format) = Self::classify(path) else {
                warn!("规则文件扩展名无效，已跳过：{}", path.display());
                continue;
            };

            let content = std::fs::read(path).map_err(|e| DanmakuFilterError::RuleReadError {
                path: path.display().to_string(),
                source: e,
            })?;

            info!("读取规则文件：{}", path.display());
            debug!(bytes = content.len(), ?format, "规则文件已读取");

            result.push(RawRuleFile {
                path: path.to_path_buf(),
                content,
                format,
            });
        }

        Ok(result)
    }

    /// 根据扩展名识别规则文件格式
    fn classify(path: &Path) -> Option<RuleFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(RuleFormat::from_extension)
    }
}
