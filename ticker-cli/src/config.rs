//! # Config 模块
//!
//! 演示程序配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (ticker.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use ticker_core::{ConfigError, TickerConfig};
use tracing::{info, warn};

/// 演示程序配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// 模拟帧率（每秒帧数）
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 日志级别（`RUST_LOG` 未设置时使用）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ticker 默认参数
    #[serde(default)]
    pub ticker: TickerConfig,
}

fn default_frame_rate() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            log_level: default_log_level(),
            ticker: TickerConfig::default(),
        }
    }
}

impl CliConfig {
    /// 读取配置文件
    ///
    /// # 返回
    /// - `Ok(Some(config))`: 读取并验证成功
    /// - `Ok(None)`: 文件不存在
    /// - `Err(e)`: 读取、解析或验证失败
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: CliConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(Some(config))
    }

    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::read(path)? {
            Some(config) => {
                info!(path = %path.display(), "配置文件加载成功");
                Ok(config)
            }
            None => {
                warn!(path = %path.display(), "配置文件不存在，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_frame_rate(self.frame_rate)?;
        self.ticker.validate()
    }
}

/// 检查帧率范围
pub fn validate_frame_rate(frame_rate: u32) -> Result<(), ConfigError> {
    if !(1..=1000).contains(&frame_rate) {
        return Err(ConfigError::InvalidFrameRate { value: frame_rate });
    }
    Ok(())
}
