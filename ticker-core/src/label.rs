//! # Label 模块
//!
//! 文本标签接口。
//!
//! 会话只通过 [`TextLabel`] 读写标签文本，不假设宿主 UI 的具体类型。
//! 接口使用 `&self`，由实现方负责内部可变性（通常是 `RefCell`），
//! 这样会话可以只持有 `Weak` 引用，不延长标签的生命周期。

use std::cell::RefCell;

/// 可读写文本的标签
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Label {
///     text: RefCell<Option<String>>,
/// }
///
/// impl TextLabel for Label {
///     fn text(&self) -> Option<String> {
///         self.text.borrow().clone()
///     }
///
///     fn set_text(&self, text: Option<String>) {
///         *self.text.borrow_mut() = text;
///     }
/// }
/// ```
pub trait TextLabel: 'static {
    /// 当前文本（`None` 表示没有文本）
    fn text(&self) -> Option<String>;

    /// 设置新文本
    fn set_text(&self, text: Option<String>);
}

/// 简单的文本标签实现
#[derive(Debug, Default)]
pub struct TextCell {
    text: RefCell<Option<String>>,
}

impl TextCell {
    /// 创建带初始文本的标签
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(Some(text.into())),
        }
    }

    /// 创建没有文本的标签
    pub fn empty() -> Self {
        Self::default()
    }

    /// 当前文本，没有文本时返回空字符串
    pub fn get(&self) -> String {
        self.text.borrow().clone().unwrap_or_default()
    }
}

impl TextLabel for TextCell {
    fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: Option<String>) {
        *self.text.borrow_mut() = text;
    }
}

impl TextLabel for RefCell<String> {
    fn text(&self) -> Option<String> {
        Some(self.borrow().clone())
    }

    fn set_text(&self, text: Option<String>) {
        *self.borrow_mut() = text.unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_cell() {
        let cell = TextCell::new("Score: 10");
        assert_eq!(cell.text(), Some("Score: 10".to_string()));

        cell.set_text(Some("Score: 11".to_string()));
        assert_eq!(cell.get(), "Score: 11");

        cell.set_text(None);
        assert_eq!(cell.text(), None);
        assert_eq!(cell.get(), "");
    }

    #[test]
    fn test_empty_cell() {
        assert_eq!(TextCell::empty().text(), None);
    }

    #[test]
    fn test_refcell_string_label() {
        let label = RefCell::new(String::from("42"));
        assert_eq!(label.text(), Some("42".to_string()));
        label.set_text(None);
        assert_eq!(label.text(), Some(String::new()));
    }
}
