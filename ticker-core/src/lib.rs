//! # Ticker Core
//!
//! 数字文本滚动动画的核心库。
//!
//! ## 架构概述
//!
//! `ticker-core` 是纯逻辑核心，不依赖任何 UI 框架，也从不阻塞或休眠。
//! 宿主提供标签（[`TextLabel`]）和逐帧调用，核心负责其余部分：
//!
//! ```text
//! Host                              Ticker
//!   │                                  │
//!   │──── animate(label, end, …) ────►│ 解析起始值、确定小数位
//!   │                                  │
//!   │──── update() 每帧 ─────────────►│ 曲线插值 → 格式化 → 拼接回标签
//!   │◄─── Vec<TickerEvent> ───────────│
//!   │                                  │
//! ```
//!
//! 标签文本中的其他文字保持不变，例如 `"Temperature: 98 F"` → `"Temperature: 23 F"`。
//!
//! ## 模块结构
//!
//! - [`locator`]：定位文本中的数字段，提取起始值
//! - [`format`]：数值格式化与小数位补齐
//! - [`splice`]：把新数字拼接回原文本
//! - [`curve`]：动画曲线
//! - [`numeric`]：调用方传入的数值
//! - [`options`]：动画选项
//! - [`label`]：标签接口
//! - [`clock`]：时间源
//! - [`session`]：单个会话的状态机
//! - [`ticker`]：会话管理器
//! - [`config`]：配置
//! - [`error`]：错误类型定义

pub mod clock;
pub mod config;
pub mod curve;
pub mod error;
pub mod format;
pub mod label;
pub mod locator;
pub mod numeric;
pub mod options;
pub mod session;
pub mod splice;
pub mod ticker;

// 重导出核心类型
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{MAX_DURATION, TickerConfig};
pub use curve::{AnimationCurve, EASE_EXPONENT};
pub use error::{ConfigError, ParseError, TickerError, TickerResult};
pub use format::{format_value, infer_decimals, natural_string, pad_with_decimals};
pub use label::{TextCell, TextLabel};
pub use locator::{DigitSpan, extract_start_value, locate};
pub use numeric::NumericValue;
pub use options::{AnimationOption, AnimationOptions};
pub use session::{CancelToken, Completion, SessionId, SessionState, TickerSession};
pub use splice::{SpliceFallback, splice_digits};
pub use ticker::{Ticker, TickerEvent};
