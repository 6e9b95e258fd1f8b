//! # Curve 模块
//!
//! 动画曲线，用于把时间进度映射为插值权重。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// 缓入/缓出曲线的指数
pub const EASE_EXPONENT: f64 = 2.8;

/// 动画曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 缓入（先慢后快）
    EaseIn,
    /// 缓出（先快后慢）
    EaseOut,
}

impl AnimationCurve {
    /// 所有曲线，按声明顺序
    pub const ALL: [AnimationCurve; 3] = [Self::Linear, Self::EaseIn, Self::EaseOut];

    /// 计算曲线值
    ///
    /// # 参数
    /// - `progress`: 时间进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// - 插值权重 (0.0 - 1.0)
    pub fn apply(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);

        match self {
            AnimationCurve::Linear => p,
            AnimationCurve::EaseIn => p.powf(EASE_EXPONENT),
            AnimationCurve::EaseOut => 1.0 - (1.0 - p).powf(EASE_EXPONENT),
        }
    }

    /// 在 `from` 与 `to` 之间按曲线插值
    pub fn interpolate(&self, from: f64, to: f64, progress: f64) -> f64 {
        from + self.apply(progress) * (to - from)
    }

    /// 配置文件中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationCurve::Linear => "linear",
            AnimationCurve::EaseIn => "ease_in",
            AnimationCurve::EaseOut => "ease_out",
        }
    }
}

impl fmt::Display for AnimationCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationCurve {
    type Err = ParseError;

    /// 接受 `linear` / `ease_in` / `ease-in` / `easeIn` 等写法（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "linear" => Ok(Self::Linear),
            "easein" => Ok(Self::EaseIn),
            "easeout" => Ok(Self::EaseOut),
            _ => Err(ParseError::UnknownCurve {
                name: s.to_string(),
            }),
        }
    }
}
