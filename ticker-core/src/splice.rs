//! # Splice 模块
//!
//! 用新的数字替换文本中的数字段，保留周围的文字。

use serde::{Deserialize, Serialize};

use crate::locator::locate;

/// 文本中没有数字时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpliceFallback {
    /// 用新数字替换整段文本
    #[default]
    ReplaceText,
    /// 保持原文本不变
    KeepText,
}

/// 替换文本中的第一段数字
///
/// # 参数
/// - `text`: 当前文本
/// - `replacement`: 新的数字字符串
/// - `fallback`: 没有数字段时的策略
pub fn splice_digits(text: &str, replacement: &str, fallback: SpliceFallback) -> String {
    match locate(text) {
        Some(span) => {
            let range = span.byte_range();
            let mut output = String::with_capacity(text.len() - range.len() + replacement.len());
            output.push_str(&text[..range.start]);
            output.push_str(replacement);
            output.push_str(&text[range.end..]);
            output
        }
        None => match fallback {
            SpliceFallback::ReplaceText => replacement.to_string(),
            SpliceFallback::KeepText => text.to_string(),
        },
    }
}
