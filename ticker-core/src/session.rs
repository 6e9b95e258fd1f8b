//! # Session 模块
//!
//! 单个数字滚动动画的状态机。
//!
//! ```text
//! Created ──start()──► Running ──tick(now)…──► Completed
//! ```
//!
//! 会话由外部时间源逐帧调用 [`TickerSession::tick`] 驱动，自身从不阻塞。
//! 时间到达后执行一次精确的终值更新，调用完成回调，然后进入 `Completed`。

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use tracing::{debug, trace};

use crate::curve::AnimationCurve;
use crate::format::{format_value, infer_decimals};
use crate::label::TextLabel;
use crate::locator::extract_start_value;
use crate::numeric::NumericValue;
use crate::options::AnimationOptions;
use crate::splice::{SpliceFallback, splice_digits};

/// 完成回调
pub type Completion = Box<dyn FnOnce()>;

/// 会话 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl SessionId {
    /// 创建新的会话 ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 已创建，尚未注册到时间源
    #[default]
    Created,
    /// 正在播放
    Running,
    /// 已结束
    Completed,
}

impl SessionState {
    /// 是否需要继续接收 tick
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// 取消令牌
///
/// 克隆出的令牌共享同一个标志。会话在每次 tick 开始时检查它，
/// 被取消的会话直接结束，不做终值更新，也不调用完成回调。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// 创建新的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 取消
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// 数字滚动动画会话
pub struct TickerSession {
    id: SessionId,
    /// 目标标签（不持有所有权）
    label: Weak<dyn TextLabel>,
    started_at: Instant,
    /// 时长（秒），0 表示第一帧即结束
    duration: f64,
    start_value: f64,
    end_value: NumericValue,
    curve: AnimationCurve,
    decimals: u32,
    fallback: SpliceFallback,
    /// 最近一次计算出的值
    current_value: f64,
    completion: Option<Completion>,
    token: CancelToken,
    state: SessionState,
    cancelled: bool,
}

impl fmt::Debug for TickerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickerSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("duration", &self.duration)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("curve", &self.curve)
            .field("decimals", &self.decimals)
            .field("label_alive", &(self.label.strong_count() > 0))
            .finish()
    }
}

impl TickerSession {
    /// 创建会话
    ///
    /// 起始值在此刻从标签文本中解析；所需小数位数在此刻确定：
    /// 用户指定（负数归零）优先，否则由目标值推断。
    /// 非正数或 NaN 时长按 0 处理。
    pub fn new<L: TextLabel>(
        id: SessionId,
        label: &Rc<L>,
        end_value: impl Into<NumericValue>,
        duration: f64,
        options: AnimationOptions,
        started_at: Instant,
    ) -> Self {
        let end_value = end_value.into();
        let start_value = extract_start_value(&label.text().unwrap_or_default());
        let decimals = options
            .requested_decimals()
            .unwrap_or_else(|| infer_decimals(end_value.to_f64()));
        let duration = if duration > 0.0 { duration } else { 0.0 };
        let weak: Weak<L> = Rc::downgrade(label);

        debug!(
            session = %id,
            start_value,
            end_value = %end_value,
            duration,
            decimals,
            "创建数字动画会话"
        );

        Self {
            id,
            label: weak,
            started_at,
            duration,
            start_value,
            end_value,
            curve: options.curve_or(AnimationCurve::default()),
            decimals,
            fallback: SpliceFallback::default(),
            current_value: start_value,
            completion: None,
            token: CancelToken::new(),
            state: SessionState::Created,
            cancelled: false,
        }
    }

    /// 设置完成回调
    pub fn with_completion(mut self, completion: impl FnOnce() + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// 设置无数字文本时的拼接策略
    pub fn with_fallback(mut self, fallback: SpliceFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// 开始播放
    pub fn start(&mut self) {
        if self.state == SessionState::Created {
            self.state = SessionState::Running;
            debug!(session = %self.id, "会话开始");
        }
    }

    /// 处理一帧
    ///
    /// 只有 `Running` 状态的会话会处理 tick。
    ///
    /// # 返回
    /// 处理后的状态
    pub fn tick(&mut self, now: Instant) -> SessionState {
        match self.state {
            SessionState::Running => {}
            SessionState::Created => {
                trace!(session = %self.id, "会话尚未开始，忽略 tick");
                return self.state;
            }
            SessionState::Completed => return self.state,
        }

        if self.token.is_cancelled() {
            self.cancel();
            return self.state;
        }

        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f64();
        if self.duration <= 0.0 || elapsed > self.duration {
            self.finish();
            return self.state;
        }

        let end = self.end_value.to_f64();
        let value = self
            .curve
            .interpolate(self.start_value, end, elapsed / self.duration);
        self.current_value = value;
        if value != end {
            self.render(value);
        }

        self.state
    }

    /// 立即取消
    ///
    /// 不做终值更新，不调用完成回调。
    pub fn cancel(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.token.cancel();
        self.cancelled = true;
        self.completion = None;
        self.state = SessionState::Completed;
        debug!(session = %self.id, "会话已取消");
    }

    /// 终止帧：精确写入终值并调用完成回调
    fn finish(&mut self) {
        let end = self.end_value.to_f64();
        self.current_value = end;
        self.render(end);
        self.state = SessionState::Completed;
        debug!(session = %self.id, end_value = %self.end_value, "会话完成");

        if let Some(completion) = self.completion.take() {
            completion();
        }
    }

    /// 把数值写入标签
    fn render(&self, value: f64) {
        let Some(label) = self.label.upgrade() else {
            trace!(session = %self.id, "标签已释放，跳过更新");
            return;
        };

        let text = label.text().unwrap_or_default();
        let formatted = format_value(value, self.decimals);
        label.set_text(Some(splice_digits(&text, &formatted, self.fallback)));
    }

    // ========== 查询方法 ==========

    /// 会话 ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// 当前状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 是否已结束
    pub fn is_complete(&self) -> bool {
        self.state.is_finished()
    }

    /// 是否因取消而结束
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// 取消令牌
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// 目标标签是否仍然存在
    pub fn is_label_alive(&self) -> bool {
        self.label.strong_count() > 0
    }

    /// 起始值
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    /// 目标值
    pub fn end_value(&self) -> NumericValue {
        self.end_value
    }

    /// 最近一次计算出的值（按目标值的数值种类返回）
    pub fn current_value(&self) -> NumericValue {
        self.end_value.coerce(self.current_value)
    }

    /// 动画曲线
    pub fn curve(&self) -> AnimationCurve {
        self.curve
    }

    /// 显示的小数位数
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// 时长（秒）
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// 开始时间
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}
