//! # Locator 模块
//!
//! 在任意文本中定位第一段数字。
//!
//! 数字段由 ASCII 数字与小数点组成；小数点不能作为数字段的首尾字符，
//! 因此 `"m.bingo 98"` 中孤立的 `.` 不会被识别，定位结果是 `"98"`。

use std::ops::Range;

/// 数字段位置
///
/// `start`/`end` 为闭区间字符下标，同时记录对应的字节区间，
/// 仅对产生它的那段文本有效。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitSpan {
    /// 首字符下标
    pub start: usize,
    /// 末字符下标（包含）
    pub end: usize,
    bytes: Range<usize>,
}

impl DigitSpan {
    /// 字符数
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// 数字段总是非空
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 字节区间
    pub fn byte_range(&self) -> Range<usize> {
        self.bytes.clone()
    }

    /// 从原文本中取出数字段
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.bytes.clone()]
    }
}

/// 定位文本中的第一段数字
///
/// # 返回
/// - `Some(span)`: 找到数字段
/// - `None`: 文本中没有任何数字
pub fn locate(text: &str) -> Option<DigitSpan> {
    // (字符下标, 字节下标)
    let mut first: Option<(usize, usize)> = None;
    let mut last: Option<(usize, usize)> = None;

    for (char_index, (byte_index, ch)) in text.char_indices().enumerate() {
        if ch.is_ascii_digit() {
            if first.is_none() {
                first = Some((char_index, byte_index));
            }
            last = Some((char_index, byte_index));
        } else if ch == '.' {
            // 小数点只延续数字段，不作为边界
            continue;
        } else if first.is_some() {
            break;
        }
    }

    let (start, start_byte) = first?;
    let (end, end_byte) = last?;
    Some(DigitSpan {
        start,
        end,
        bytes: start_byte..end_byte + 1,
    })
}

/// 从文本中提取起始数值
///
/// 先尝试把整段文本解析为数字；失败时解析第一段数字；
/// 仍然失败或没有数字时返回 0。
pub fn extract_start_value(text: &str) -> f64 {
    if let Ok(value) = text.parse::<f64>() {
        return value;
    }

    match locate(text) {
        Some(span) => span.as_str(text).parse().unwrap_or(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(text: &str) -> Option<&str> {
        locate(text).map(|span| span.as_str(text))
    }

    #[test]
    fn test_locate_examples() {
        assert_eq!(located("Temperature: 98 F"), Some("98"));
        assert_eq!(located("2938.98"), Some("2938.98"));
        assert_eq!(located("mixed983.1000bingo"), Some("983.1000"));
        assert_eq!(located("m.bingo 98"), Some("98"));
    }

    #[test]
    fn test_locate_indices() {
        let span = locate("Temperature: 98 F").unwrap();
        assert_eq!(span.start, 13);
        assert_eq!(span.end, 14);
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn test_locate_no_digits() {
        assert_eq!(locate(""), None);
        assert_eq!(locate("no digits here"), None);
        assert_eq!(locate("..."), None);
    }

    #[test]
    fn test_dots_are_not_boundaries() {
        assert_eq!(located(".5"), Some("5"));
        assert_eq!(located("12. apples"), Some("12"));
        assert_eq!(located("v1.2.3 build"), Some("1.2.3"));
    }

    #[test]
    fn test_only_first_run() {
        assert_eq!(located("3 of 12"), Some("3"));
    }

    #[test]
    fn test_character_indices_with_multibyte_prefix() {
        let text = "温度：98 度";
        let span = locate(text).unwrap();
        assert_eq!(span.start, 3);
        assert_eq!(span.end, 4);
        assert_eq!(span.as_str(text), "98");
    }

    #[test]
    fn test_extract_start_value() {
        assert_eq!(extract_start_value("0"), 0.0);
        assert_eq!(extract_start_value("150"), 150.0);
        assert_eq!(extract_start_value("-11110.25"), -11110.25);
        assert_eq!(extract_start_value("Temperature: 98 F"), 98.0);
        assert_eq!(extract_start_value("mixed983.1000bingo"), 983.1);
        // 多个小数点无法解析
        assert_eq!(extract_start_value("v1.2.3"), 0.0);
        assert_eq!(extract_start_value("nothing"), 0.0);
        assert_eq!(extract_start_value(""), 0.0);
    }
}
