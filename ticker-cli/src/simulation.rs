//! # Simulation 模块
//!
//! 用手动时钟逐帧驱动 [`Ticker`]，把每次文本变化报告给调用方。
//!
//! 帧数有上限：`ceil(最长时长 × 帧率) + 2`，动画必然在上限内结束。

use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ticker_core::{
    AnimationCurve, AnimationOptions, ConfigError, MAX_DURATION, ManualClock, NumericValue,
    TextCell, Ticker, TickerConfig, TickerEvent,
};
use tracing::{debug, info, warn};

use crate::config::validate_frame_rate;

/// 单个标签的动画任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelJob {
    /// 初始文本
    pub text: String,
    /// 目标数值
    pub to: NumericValue,
    /// 时长（秒），缺省使用配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<AnimationCurve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i32>,
}

impl LabelJob {
    pub fn new(text: impl Into<String>, to: impl Into<NumericValue>) -> Self {
        Self {
            text: text.into(),
            to: to.into(),
            duration: None,
            curve: None,
            decimals: None,
        }
    }

    /// 动画选项
    pub fn options(&self) -> AnimationOptions {
        AnimationOptions {
            curve: self.curve,
            decimals: self.decimals,
        }
    }

    /// 实际时长，未指定时使用配置默认值
    pub fn effective_duration(&self, config: &TickerConfig) -> f64 {
        self.duration.unwrap_or(config.default_duration)
    }

    /// 时长必须是有限数值且不超过 [`MAX_DURATION`]（零或负数表示立即完成）
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.duration {
            Some(value) if !value.is_finite() || value > MAX_DURATION => {
                Err(ConfigError::InvalidDuration { value })
            }
            _ => Ok(()),
        }
    }
}

/// 批量任务文件
///
/// ```json
/// { "labels": [ { "text": "Score: 0", "to": 100, "duration": 1.5 } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub labels: Vec<LabelJob>,
}

impl BatchFile {
    /// 从 JSON 文件加载并验证
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let batch: BatchFile =
            serde_json::from_str(content).map_err(|e| ConfigError::Json(e.to_string()))?;
        batch.validate()?;
        Ok(batch)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.labels.iter().try_for_each(LabelJob::validate)
    }
}

/// 一次文本变化
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    /// 帧序号（从 0 开始）
    pub frame: usize,
    /// 标签在任务列表中的下标
    pub label: usize,
    /// 模拟经过的时间
    pub elapsed: Duration,
    /// 新文本
    pub text: String,
}

/// 模拟结果
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// 实际执行的帧数
    pub frames: usize,
    /// 每个标签的最终文本
    pub final_texts: Vec<String>,
    /// 按顺序收到的事件
    pub events: Vec<TickerEvent>,
}

/// 逐帧模拟器
#[derive(Debug, Clone)]
pub struct Simulation {
    frame_rate: u32,
    realtime: bool,
    ticker_config: TickerConfig,
}

impl Simulation {
    pub fn new(frame_rate: u32, ticker_config: TickerConfig) -> Result<Self, ConfigError> {
        validate_frame_rate(frame_rate)?;
        ticker_config.validate()?;
        Ok(Self {
            frame_rate,
            realtime: false,
            ticker_config,
        })
    }

    /// 是否按真实时间休眠
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// 每帧间隔
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }

    /// 给定时长所需的最大帧数
    pub fn max_frames(&self, duration: f64) -> usize {
        let duration = if duration > 0.0 { duration } else { 0.0 };
        // f64 → usize 的转换在溢出时饱和
        ((duration * f64::from(self.frame_rate)).ceil() as usize).saturating_add(2)
    }

    /// 运行所有任务，每次文本变化调用一次 `on_update`
    pub fn run(
        &self,
        jobs: &[LabelJob],
        mut on_update: impl FnMut(&FrameUpdate),
    ) -> Result<SimulationReport, ConfigError> {
        for job in jobs {
            job.validate()?;
        }

        let clock = ManualClock::new();
        let mut ticker = Ticker::with_clock(clock.clone(), self.ticker_config.clone());
        let labels: Vec<Rc<TextCell>> = jobs
            .iter()
            .map(|job| Rc::new(TextCell::new(job.text.as_str())))
            .collect();

        let mut longest: f64 = 0.0;
        for (job, label) in jobs.iter().zip(&labels) {
            let duration = job.effective_duration(&self.ticker_config);
            longest = longest.max(duration);
            ticker.animate_with_duration(label, job.to, duration, job.options());
        }

        let max_frames = self.max_frames(longest);
        let interval = self.frame_interval();
        info!(
            labels = jobs.len(),
            fps = self.frame_rate,
            max_frames,
            "开始模拟"
        );

        let mut last_texts: Vec<String> = labels.iter().map(|label| label.get()).collect();
        let mut events = Vec::new();
        let mut frames = 0;

        for frame in 0..max_frames {
            frames = frame + 1;
            let frame_events = ticker.update();
            for event in &frame_events {
                debug!(frame, ?event, "动画事件");
            }
            events.extend(frame_events);

            for (index, label) in labels.iter().enumerate() {
                let text = label.get();
                if text != last_texts[index] {
                    on_update(&FrameUpdate {
                        frame,
                        label: index,
                        elapsed: interval * frame as u32,
                        text: text.clone(),
                    });
                    last_texts[index] = text;
                }
            }

            if !ticker.has_active_sessions() {
                break;
            }

            clock.advance(interval);
            if self.realtime {
                thread::sleep(interval);
            }
        }

        if ticker.has_active_sessions() {
            warn!(frames, "达到最大帧数仍有未完成的动画，全部取消");
            ticker.cancel_all();
            events.extend(ticker.update());
        }

        Ok(SimulationReport {
            frames,
            final_texts: last_texts,
            events,
        })
    }
}
