//! # Config 模块
//!
//! `Ticker` 的默认参数。
//!
//! 只描述配置内容与校验，不做文件 IO；读取配置文件由宿主负责。

use serde::{Deserialize, Serialize};

use crate::curve::AnimationCurve;
use crate::error::ConfigError;
use crate::splice::SpliceFallback;

/// Ticker 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// 未指定时长时使用的默认时长（秒）
    #[serde(default = "default_duration")]
    pub default_duration: f64,

    /// 未指定曲线时使用的默认曲线
    #[serde(default)]
    pub default_curve: AnimationCurve,

    /// 标签文本中没有数字时的拼接策略
    #[serde(default)]
    pub splice_fallback: SpliceFallback,
}

/// 允许的最长动画时长（秒）
pub const MAX_DURATION: f64 = 86_400.0;

fn default_duration() -> f64 {
    2.0
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            default_curve: AnimationCurve::default(),
            splice_fallback: SpliceFallback::default(),
        }
    }
}

impl TickerConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_duration.is_finite()
            || !(0.0..=MAX_DURATION).contains(&self.default_duration)
        {
            return Err(ConfigError::InvalidDuration {
                value: self.default_duration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TickerConfig::default();
        assert_eq!(config.default_duration, 2.0);
        assert_eq!(config.default_curve, AnimationCurve::Linear);
        assert_eq!(config.splice_fallback, SpliceFallback::ReplaceText);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TickerConfig =
            serde_json::from_str(r#"{"default_curve":"ease_out","splice_fallback":"keep_text"}"#)
                .unwrap();
        assert_eq!(config.default_duration, 2.0);
        assert_eq!(config.default_curve, AnimationCurve::EaseOut);
        assert_eq!(config.splice_fallback, SpliceFallback::KeepText);
    }

    #[test]
    fn test_config_validation() {
        let mut config = TickerConfig::default();

        config.default_duration = -1.0;
        assert!(config.validate().is_err());

        config.default_duration = f64::INFINITY;
        assert!(config.validate().is_err());

        config.default_duration = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_duration_rejected() {
        let mut config = TickerConfig::default();

        config.default_duration = 1e300;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));

        config.default_duration = MAX_DURATION;
        assert!(config.validate().is_ok());
    }
}
