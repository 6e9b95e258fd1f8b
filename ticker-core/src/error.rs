//! # Error 模块
//!
//! 定义 ticker-core 中使用的错误类型。
//!
//! 动画本身不会失败（解析失败退化为 0，负的小数位数归零，标签被释放时静默跳过），
//! 这里的错误只出现在输入边界：字符串解析与配置校验。

use thiserror::Error;

/// 解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 未知的动画曲线名称
    #[error("未知的动画曲线 '{name}'，可选值：linear、ease_in、ease_out")]
    UnknownCurve { name: String },

    /// 无效的数值字面量
    #[error("无效的数值 '{input}'")]
    InvalidNumber { input: String },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 动画时长无效
    #[error("动画时长必须是非负有限数，实际为 {value}")]
    InvalidDuration { value: f64 },

    /// 帧率无效
    #[error("帧率必须在 1 - 1000 之间，实际为 {value}")]
    InvalidFrameRate { value: u32 },

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),

    /// JSON 解析/序列化错误
    #[error("配置 JSON 错误: {0}")]
    Json(String),
}

/// ticker-core 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickerError {
    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type TickerResult<T> = Result<T, TickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: TickerError = ParseError::UnknownCurve {
            name: "bounce".to_string(),
        }
        .into();
        assert!(matches!(err, TickerError::Parse(_)));
        assert!(err.to_string().contains("bounce"));

        let err: TickerError = ConfigError::InvalidDuration { value: -1.0 }.into();
        assert!(matches!(err, TickerError::Config(_)));
    }
}
