//! 全局错误类型定义

use thiserror::Error;
use quick_xml::Error as XmlError;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum DanmakuFilterError {
    // 配置相关错误
    #[error("配置无效：{0}")]
    ConfigError(String),

    // 规则相关错误
    #[error("规则目录遍历失败：{0}")]
    RuleWalkError(#[from] walkdir::Error),
    #[error("规则文件读取失败：{path}：{source}")]
    RuleReadError {
        path: String,
        #[source]
        source: IoError,
    },
    #[error("XML规则解析失败：{0}")]
    XmlRuleError(#[from] XmlError),
    #[error("XML规则文件结构不完整：{0}")]
    XmlStructureError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),
    #[error("未找到会话Cookie：{0}")]
    CookieNotFound(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("弹幕数据格式错误：第 {0} 条缺少文本字段")]
    MalformedRow(usize),

    // 服务相关错误
    #[error("服务启动失败：{0}")]
    ServerError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
}

// 全局Result类型
pub type DfResult<T> = Result<T, DanmakuFilterError>;
