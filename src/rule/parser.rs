//! 规则解析器
//! 将原始规则文件（txt / xml 两种格式）解析为扁平的规则列表

use std::borrow::Cow;

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::{debug, info};

use super::model::{RawRuleFile, Rule, RuleFormat, RuleSet};
use crate::error::{DanmakuFilterError, DfResult};

/// 表情转义统一替换成的占位符
pub const EMOJI_SENTINEL: &str = "[e]";

/// 正则规则前缀
const PATTERN_PREFIX: &str = "r=";

/// XML 屏蔽条目标签：`<filters><item enabled="true">r=...</item></filters>`
const ITEM_TAG: &[u8] = b"item";

/// 条目只认根元素的直接子元素
const ITEM_DEPTH: usize = 2;

/// 匹配规则文件中残留的 `\uXXXX` 转义
static ESCAPED_CODEPOINT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\u[0-9A-Za-z_]{4}").expect("escaped codepoint regex is valid")
});

/// 解析中的 XML 条目，正文原样保留（不裁剪空白）
#[derive(Debug, Default)]
struct FilterItem {
    enabled: bool,
    text: String,
}

impl FilterItem {
    fn from_start(start: &BytesStart<'_>) -> DfResult<Self> {
        let enabled = match start
            .try_get_attribute("enabled")
            .map_err(quick_xml::Error::from)?
        {
            Some(attr) => attr.unescape_value()? == "true",
            None => false,
        };
        Ok(Self {
            enabled,
            text: String::new(),
        })
    }

    fn into_rule(self) -> Option<Rule> {
        if !self.enabled || !self.text.starts_with(PATTERN_PREFIX) {
            return None;
        }
        let normalized = normalize(&self.text);
        let pattern = normalized
            .strip_prefix(PATTERN_PREFIX)
            .unwrap_or(&normalized)
            .to_string();
        Some(Rule::pattern(pattern))
    }
}

/// 规则解析器
pub struct RuleParser;

impl RuleParser {
    /// 解析全部规则文件，按文件顺序拼接规则
    pub fn parse(files: Vec<RawRuleFile>) -> DfResult<RuleSet> {
        let mut rules = Vec::new();

        for file in files {
            let parsed = match file.format {
                RuleFormat::PlainList => Self::parse_plain_list(&file.content),
                RuleFormat::StructuredList => Self::parse_structured_list(&file.content)?,
            };
            debug!("规则文件 {} 解析出 {} 条规则", file.path.display(), parsed.len());
            rules.extend(parsed);
        }

        let rule_set = RuleSet::new(rules);
        let (literal_count, pattern_count) = rule_set.count_by_kind();
        info!(
            keywords = literal_count,
            patterns = pattern_count,
            "规则解析完成，共 {} 条规则",
            rule_set.len()
        );

        Ok(rule_set)
    }

    /// 纯文本：每行一条关键词规则，空行不产生规则
    pub fn parse_plain_list(content: &[u8]) -> Vec<Rule> {
        String::from_utf8_lossy(content)
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| Rule::literal(normalize(line)))
            .collect()
    }

    /// XML：仅 enabled="true" 且正文以 `r=` 开头的条目生成正则规则
    ///
    /// 其余条目静默丢弃；条目之间可以夹杂其他元素。
    /// 文件结构不合法（标签不匹配、未闭合、没有根元素）时返回错误。
    pub fn parse_structured_list(content: &[u8]) -> DfResult<Vec<Rule>> {
        let xml = String::from_utf8_lossy(content);
        let mut reader = Reader::from_str(&xml);
        reader.config_mut().trim_text(false);

        let mut rules = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut current: Option<FilterItem> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    depth += 1;
                    seen_root = true;
                    if depth == ITEM_DEPTH && start.local_name().as_ref() == ITEM_TAG {
                        current = Some(FilterItem::from_start(&start)?);
                    }
                }
                Event::Empty(start) => {
                    seen_root = true;
                    if depth + 1 == ITEM_DEPTH && start.local_name().as_ref() == ITEM_TAG {
                        rules.extend(FilterItem::from_start(&start)?.into_rule());
                    }
                }
                Event::Text(text) if depth == ITEM_DEPTH => {
                    if let Some(item) = current.as_mut() {
                        item.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(cdata) if depth == ITEM_DEPTH => {
                    if let Some(item) = current.as_mut() {
                        item.text.push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Event::End(_) => {
                    if depth == ITEM_DEPTH {
                        if let Some(item) = current.take() {
                            rules.extend(item.into_rule());
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth > 0 {
            return Err(DanmakuFilterError::XmlStructureError(format!(
                "{depth} 个元素未闭合"
            )));
        }
        if !seen_root {
            return Err(DanmakuFilterError::XmlStructureError("缺少根元素".to_string()));
        }

        Ok(rules)
    }
}

/// 将 `\uXXXX` 转义替换为 `[e]` 占位符
///
/// 只作用于规则文本，不作用于待过滤的弹幕。
pub fn normalize(text: &str) -> Cow<'_, str> {
    ESCAPED_CODEPOINT_REGEX.replace_all(text, EMOJI_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::model::RuleKind;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_replaces_escaped_codepoint() {
        assert_eq!(normalize(r"a\u00e9b"), "a[e]b");
        assert_eq!(normalize(r"\ud83d\ude00!"), "[e][e]!");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(r"x\u263ay\u00e9").into_owned();
        let twice = normalize(&once).into_owned();
        assert_eq!(once, "x[e]y[e]");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_leaves_short_or_uppercase_escape() {
        // 不足四位或大写 U 均不替换
        assert_eq!(normalize(r"\u12"), r"\u12");
        assert_eq!(normalize(r"\U00e9"), r"\U00e9");
        // 非 ASCII 单词字符不计入
        assert_eq!(normalize(r"\uéééé"), r"\uéééé");
    }

    #[test]
    fn test_plain_list_one_literal_per_line() {
        let rules = RuleParser::parse_plain_list(b"spam\nad\\u00e9\r\nfoo");
        assert_eq!(
            rules,
            vec![Rule::literal("spam"), Rule::literal("ad[e]"), Rule::literal("foo")]
        );
    }

    #[test]
    fn test_plain_list_skips_blank_lines() {
        let rules = RuleParser::parse_plain_list(b"\nspam\n\n\r\n");
        assert_eq!(rules, vec![Rule::literal("spam")]);
    }

    #[test]
    fn test_structured_list_selection() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<filters>
    <item enabled="false">r=foo</item>
    <item enabled="true">foo</item>
    <item enabled="true">r=foo</item>
    <item enabled="TRUE">r=bar</item>
    <item>r=baz</item>
</filters>"#;

        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(rules, vec![Rule::pattern("foo")]);
        assert_eq!(rules[0].kind, RuleKind::Pattern);
    }

    #[test]
    fn test_structured_list_normalizes_before_strip() {
        let xml = br#"<filters><item enabled="true">r=\u263a+</item></filters>"#;
        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(rules, vec![Rule::pattern("[e]+")]);
    }

    #[test]
    fn test_structured_list_keeps_malformed_pattern() {
        // 正则合法性在过滤时才检查
        let xml = br#"<filters><item enabled="true">r=(</item></filters>"#;
        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(rules, vec![Rule::pattern("(")]);
    }

    #[test]
    fn test_structured_list_empty_root() {
        let rules = RuleParser::parse_structured_list(b"<filters/>").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_structured_list_malformed_is_error() {
        let xml = br#"<filters><item enabled="true">r=a</filters>"#;
        let err = RuleParser::parse_structured_list(xml).unwrap_err();
        assert!(matches!(err, DanmakuFilterError::XmlRuleError(_)));
    }

    #[test]
    fn test_structured_list_keeps_body_whitespace() {
        // 前导空白使条目不再以 r= 开头；尾随空白属于正则的一部分
        let xml = br#"<filters><item enabled="true"> r=foo</item><item enabled="true">r=bar </item></filters>"#;
        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(rules, vec![Rule::pattern("bar ")]);
    }

    #[test]
    fn test_structured_list_items_split_by_other_elements() {
        let xml = br#"<filters>
    <item enabled="true">r=a</item>
    <group/>
    <note>ignored</note>
    <item enabled="true">r=b</item>
</filters>"#;
        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(rules, vec![Rule::pattern("a"), Rule::pattern("b")]);
    }

    #[test]
    fn test_structured_list_body_text_forms() {
        // 实体、CDATA 拼接为正文；嵌套元素的文本和更深层的 item 不计入
        let xml = br#"<filters>
    <item enabled="true">r=a&amp;b</item>
    <item enabled="true"><![CDATA[r=<x>]]></item>
    <item enabled="true">r=c<b>zzz</b>d</item>
    <group><item enabled="true">r=nested</item></group>
    <item enabled="true"/>
</filters>"#;
        let rules = RuleParser::parse_structured_list(xml).unwrap();
        assert_eq!(
            rules,
            vec![Rule::pattern("a&b"), Rule::pattern("<x>"), Rule::pattern("cd")]
        );
    }

    #[test]
    fn test_structured_list_unclosed_or_empty_is_error() {
        let err = RuleParser::parse_structured_list(b"<filters><item enabled=\"true\">r=a</item>")
            .unwrap_err();
        assert!(matches!(
            err,
            DanmakuFilterError::XmlStructureError(_) | DanmakuFilterError::XmlRuleError(_)
        ));

        let err = RuleParser::parse_structured_list(b"").unwrap_err();
        assert!(matches!(err, DanmakuFilterError::XmlStructureError(_)));
    }

    #[test]
    fn test_parse_concatenates_in_file_order() {
        let files = vec![
            RawRuleFile {
                path: PathBuf::from("a.txt"),
                content: b"one\ntwo".to_vec(),
                format: RuleFormat::PlainList,
            },
            RawRuleFile {
                path: PathBuf::from("b.xml"),
                content: br#"<filters><item enabled="true">r=\d+</item></filters>"#.to_vec(),
                format: RuleFormat::StructuredList,
            },
        ];

        let rule_set = RuleParser::parse(files).unwrap();
        assert_eq!(
            rule_set.rules,
            vec![Rule::literal("one"), Rule::literal("two"), Rule::pattern(r"\d+")]
        );
        assert_eq!(rule_set.count_by_kind(), (2, 1));
    }
}
