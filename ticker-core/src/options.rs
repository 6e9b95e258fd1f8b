//! # Options 模块
//!
//! 动画选项：曲线与小数位数。
//!
//! 选项可以以列表形式给出（[`AnimationOption`]），折叠为 [`AnimationOptions`] 时
//! 只保留第一个曲线选项和第一个小数位选项。

use serde::{Deserialize, Serialize};

use crate::curve::AnimationCurve;

/// 单个动画选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOption {
    /// 动画曲线
    Curve(AnimationCurve),
    /// 小数位数（负数按 0 处理）
    DecimalPoints(i32),
}

impl From<AnimationCurve> for AnimationOption {
    fn from(curve: AnimationCurve) -> Self {
        AnimationOption::Curve(curve)
    }
}

/// 动画选项集合
///
/// 每类选项最多一个。未指定小数位数时由目标值推断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationOptions {
    /// 动画曲线
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<AnimationCurve>,
    /// 小数位数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i32>,
}

impl AnimationOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置曲线
    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// 设置小数位数
    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// 解析后的曲线，未指定时使用 `default`
    pub fn curve_or(&self, default: AnimationCurve) -> AnimationCurve {
        self.curve.unwrap_or(default)
    }

    /// 用户请求的小数位数（负数归零）
    pub fn requested_decimals(&self) -> Option<u32> {
        self.decimals.map(|d| d.max(0) as u32)
    }
}

impl FromIterator<AnimationOption> for AnimationOptions {
    fn from_iter<I: IntoIterator<Item = AnimationOption>>(iter: I) -> Self {
        let mut options = AnimationOptions::default();
        for option in iter {
            match option {
                AnimationOption::Curve(curve) => {
                    options.curve.get_or_insert(curve);
                }
                AnimationOption::DecimalPoints(decimals) => {
                    options.decimals.get_or_insert(decimals);
                }
            }
        }
        options
    }
}

impl From<&[AnimationOption]> for AnimationOptions {
    fn from(list: &[AnimationOption]) -> Self {
        list.iter().copied().collect()
    }
}

impl From<AnimationCurve> for AnimationOptions {
    fn from(curve: AnimationCurve) -> Self {
        AnimationOptions::new().with_curve(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_option_wins() {
        let list = [
            AnimationOption::DecimalPoints(2),
            AnimationOption::Curve(AnimationCurve::EaseOut),
            AnimationOption::Curve(AnimationCurve::EaseIn),
            AnimationOption::DecimalPoints(5),
        ];
        let options = AnimationOptions::from(&list[..]);
        assert_eq!(options.curve, Some(AnimationCurve::EaseOut));
        assert_eq!(options.decimals, Some(2));
    }

    #[test]
    fn test_negative_decimals_clamp() {
        let options = AnimationOptions::new().with_decimals(-3);
        assert_eq!(options.requested_decimals(), Some(0));
        assert_eq!(AnimationOptions::new().requested_decimals(), None);
    }

    #[test]
    fn test_curve_default() {
        let options = AnimationOptions::new();
        assert_eq!(
            options.curve_or(AnimationCurve::Linear),
            AnimationCurve::Linear
        );
        let options: AnimationOptions = AnimationCurve::EaseIn.into();
        assert_eq!(
            options.curve_or(AnimationCurve::Linear),
            AnimationCurve::EaseIn
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let options: AnimationOptions = serde_json::from_str(r#"{"curve":"ease_out"}"#).unwrap();
        assert_eq!(options.curve, Some(AnimationCurve::EaseOut));
        assert_eq!(options.decimals, None);
    }
}
