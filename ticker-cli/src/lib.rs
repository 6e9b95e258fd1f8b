//! # Ticker CLI
//!
//! `ticker-core` 的无界面演示：在终端里按帧率模拟动画并打印每次文本变化。
//!
//! - [`config`]：演示程序配置（ticker.json）
//! - [`simulation`]：手动时钟逐帧驱动、批量任务文件
//! - [`logging`]：日志初始化

pub mod config;
pub mod logging;
pub mod simulation;

pub use config::CliConfig;
pub use simulation::{BatchFile, FrameUpdate, LabelJob, Simulation, SimulationReport};
