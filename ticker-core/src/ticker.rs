//! # Ticker 模块
//!
//! 会话管理器，相当于宿主的逐帧时间源。
//!
//! 宿主每帧调用一次 [`Ticker::update`]，Ticker 驱动所有会话，
//! 移除已结束的会话并返回生命周期事件：
//! ```rust,ignore
//! let label = Rc::new(TextCell::new("Temperature: 98 F"));
//! let mut ticker = Ticker::new();
//! ticker.animate_with_options(&label, 23, AnimationCurve::EaseOut);
//!
//! // 每帧
//! for event in ticker.update() {
//!     // ...
//! }
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::TickerConfig;
use crate::label::TextLabel;
use crate::numeric::NumericValue;
use crate::options::AnimationOptions;
use crate::session::{CancelToken, Completion, SessionId, SessionState, TickerSession};

/// 会话事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerEvent {
    /// 会话开始
    Started(SessionId),
    /// 会话完成（已写入终值并调用完成回调）
    Completed(SessionId),
    /// 会话被取消
    Cancelled(SessionId),
}

/// 数字滚动动画管理器
///
/// 会话之间互不共享状态，每个会话只持有自己标签的弱引用。
pub struct Ticker<C: Clock = SystemClock> {
    clock: C,
    config: TickerConfig,
    /// 按 ID 升序遍历，回调与事件顺序一致
    sessions: BTreeMap<SessionId, TickerSession>,
    next_session_id: u64,
    /// 待处理的事件队列
    events: Vec<TickerEvent>,
}

impl Default for Ticker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> std::fmt::Debug for Ticker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("sessions", &self.sessions.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Ticker<SystemClock> {
    /// 使用系统时钟和默认配置创建
    pub fn new() -> Self {
        Self::with_clock(SystemClock, TickerConfig::default())
    }

    /// 使用系统时钟和指定配置创建
    pub fn with_config(config: TickerConfig) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl<C: Clock> Ticker<C> {
    /// 使用指定时钟和配置创建
    pub fn with_clock(clock: C, config: TickerConfig) -> Self {
        Self {
            clock,
            config,
            sessions: BTreeMap::new(),
            next_session_id: 1,
            events: Vec::new(),
        }
    }

    /// 当前配置
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// 时钟
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn next_id(&mut self) -> SessionId {
        let id = SessionId::new(self.next_session_id);
        self.next_session_id += 1;
        id
    }

    // ========== 动画控制 ==========

    /// 使用默认时长和默认曲线启动动画
    pub fn animate<L: TextLabel>(
        &mut self,
        label: &Rc<L>,
        end_value: impl Into<NumericValue>,
    ) -> SessionId {
        let duration = self.config.default_duration;
        self.spawn(label, end_value.into(), duration, AnimationOptions::new(), None)
    }

    /// 使用默认时长启动动画
    pub fn animate_with_options<L: TextLabel>(
        &mut self,
        label: &Rc<L>,
        end_value: impl Into<NumericValue>,
        options: impl Into<AnimationOptions>,
    ) -> SessionId {
        let duration = self.config.default_duration;
        self.spawn(label, end_value.into(), duration, options.into(), None)
    }

    /// 指定时长启动动画
    pub fn animate_with_duration<L: TextLabel>(
        &mut self,
        label: &Rc<L>,
        end_value: impl Into<NumericValue>,
        duration: f64,
        options: impl Into<AnimationOptions>,
    ) -> SessionId {
        self.spawn(label, end_value.into(), duration, options.into(), None)
    }

    /// 指定时长启动动画，结束时调用 `on_complete`
    ///
    /// 回调在终值写入之后调用且只调用一次；标签被释放时仍会按时调用。
    /// 会话被取消时不调用。
    pub fn animate_with_completion<L: TextLabel>(
        &mut self,
        label: &Rc<L>,
        end_value: impl Into<NumericValue>,
        duration: f64,
        options: impl Into<AnimationOptions>,
        on_complete: impl FnOnce() + 'static,
    ) -> SessionId {
        self.spawn(
            label,
            end_value.into(),
            duration,
            options.into(),
            Some(Box::new(on_complete)),
        )
    }

    fn spawn<L: TextLabel>(
        &mut self,
        label: &Rc<L>,
        end_value: NumericValue,
        duration: f64,
        mut options: AnimationOptions,
        completion: Option<Completion>,
    ) -> SessionId {
        let id = self.next_id();
        options.curve.get_or_insert(self.config.default_curve);

        let mut session = TickerSession::new(
            id,
            label,
            end_value,
            duration,
            options,
            self.clock.now(),
        )
        .with_fallback(self.config.splice_fallback);
        if let Some(completion) = completion {
            session = session.with_completion(completion);
        }
        session.start();

        self.sessions.insert(id, session);
        self.events.push(TickerEvent::Started(id));
        id
    }

    /// 以时钟的当前时间更新所有会话
    ///
    /// # 返回
    /// 返回产生的事件列表
    pub fn update(&mut self) -> Vec<TickerEvent> {
        let now = self.clock.now();
        self.update_at(now)
    }

    /// 以指定时间更新所有会话
    pub fn update_at(&mut self, now: Instant) -> Vec<TickerEvent> {
        let mut finished: Vec<SessionId> = Vec::new();

        for (id, session) in &mut self.sessions {
            if session.tick(now) == SessionState::Completed {
                finished.push(*id);
            }
        }

        // 按创建顺序发送结束事件并解除注册
        for id in finished {
            if let Some(session) = self.sessions.remove(&id) {
                self.events.push(finish_event(&session));
            }
        }

        std::mem::take(&mut self.events)
    }

    /// 取消会话
    ///
    /// 会话立即结束，不写入终值，不调用完成回调。
    ///
    /// # 返回
    /// - `true`: 会话存在并已取消
    /// - `false`: 会话不存在（已结束或从未创建）
    pub fn cancel(&mut self, id: SessionId) -> bool {
        match self.sessions.remove(&id) {
            Some(mut session) => {
                session.cancel();
                self.events.push(TickerEvent::Cancelled(id));
                true
            }
            None => false,
        }
    }

    /// 取消所有会话
    pub fn cancel_all(&mut self) {
        let ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// 清空所有会话和事件（不产生事件，不调用回调）
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.events.clear();
        debug!("已清空所有数字动画会话");
    }

    // ========== 查询方法 ==========

    /// 会话是否仍在运行
    pub fn is_active(&self, id: SessionId) -> bool {
        self.sessions
            .get(&id)
            .is_some_and(|session| session.state().is_active())
    }

    /// 是否有运行中的会话
    pub fn has_active_sessions(&self) -> bool {
        self.sessions.values().any(|s| s.state().is_active())
    }

    /// 运行中的会话数量
    pub fn active_count(&self) -> usize {
        self.sessions
            .values()
            .filter(|s| s.state().is_active())
            .count()
    }

    /// 获取会话
    pub fn session(&self, id: SessionId) -> Option<&TickerSession> {
        self.sessions.get(&id)
    }

    /// 获取会话的取消令牌
    pub fn cancel_token(&self, id: SessionId) -> Option<CancelToken> {
        self.sessions.get(&id).map(TickerSession::cancel_token)
    }
}

fn finish_event(session: &TickerSession) -> TickerEvent {
    if session.was_cancelled() {
        debug!(session = %session.id(), "会话被取消令牌终止");
        TickerEvent::Cancelled(session.id())
    } else {
        TickerEvent::Completed(session.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::curve::AnimationCurve;
    use crate::label::TextCell;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    fn manual_ticker() -> (Ticker<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let ticker = Ticker::with_clock(clock.clone(), TickerConfig::default());
        (ticker, clock)
    }

    #[test]
    fn test_animate_uses_defaults() {
        let (mut ticker, _clock) = manual_ticker();
        let label = Rc::new(TextCell::new("0"));

        let id = ticker.animate(&label, 10);
        let session = ticker.session(id).unwrap();
        assert_eq!(session.duration(), 2.0);
        assert_eq!(session.curve(), AnimationCurve::Linear);
        assert!(ticker.is_active(id));
    }

    #[test]
    fn test_config_default_curve() {
        let clock = ManualClock::new();
        let config = TickerConfig {
            default_curve: AnimationCurve::EaseOut,
            ..TickerConfig::default()
        };
        let mut ticker = Ticker::with_clock(clock, config);
        let label = Rc::new(TextCell::new("0"));

        let id = ticker.animate(&label, 10);
        assert_eq!(ticker.session(id).unwrap().curve(), AnimationCurve::EaseOut);

        // 显式指定的曲线优先
        let id = ticker.animate_with_options(&label, 10, AnimationCurve::EaseIn);
        assert_eq!(ticker.session(id).unwrap().curve(), AnimationCurve::EaseIn);
    }

    #[test]
    fn test_update_events() {
        let (mut ticker, clock) = manual_ticker();
        let label = Rc::new(TextCell::new("0"));

        let id = ticker.animate_with_duration(&label, 100, 1.0, AnimationOptions::new());
        assert_eq!(ticker.update(), vec![TickerEvent::Started(id)]);

        clock.advance(Duration::from_millis(500));
        assert!(ticker.update().is_empty());
        assert_eq!(label.get(), "50");

        clock.advance(Duration::from_millis(600));
        assert_eq!(ticker.update(), vec![TickerEvent::Completed(id)]);
        assert_eq!(label.get(), "100");
        assert!(!ticker.is_active(id));
        assert!(ticker.session(id).is_none());
    }

    #[test]
    fn test_completion_called_once() {
        let (mut ticker, clock) = manual_ticker();
        let label = Rc::new(TextCell::new("0"));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        ticker.animate_with_completion(&label, 100, 0.0, AnimationOptions::new(), move || {
            counter.set(counter.get() + 1)
        });

        ticker.update();
        clock.advance(Duration::from_millis(100));
        ticker.update();

        assert_eq!(label.get(), "100");
        assert_eq!(calls.get(), 1);
        assert!(!ticker.has_active_sessions());
    }

    #[test]
    fn test_cancel() {
        let (mut ticker, clock) = manual_ticker();
        let label = Rc::new(TextCell::new("0"));
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        let id = ticker.animate_with_completion(&label, 100, 1.0, AnimationOptions::new(), move || {
            flag.set(true)
        });
        ticker.update();

        assert!(ticker.cancel(id));
        assert!(!ticker.cancel(id));
        assert_eq!(ticker.update(), vec![TickerEvent::Cancelled(id)]);

        clock.advance(Duration::from_secs(5));
        ticker.update();
        assert_eq!(label.get(), "0");
        assert!(!done.get());
    }

    #[test]
    fn test_external_cancel_token() {
        let (mut ticker, clock) = manual_ticker();
        let label = Rc::new(TextCell::new("0"));

        let id = ticker.animate_with_duration(&label, 100, 1.0, AnimationOptions::new());
        let token = ticker.cancel_token(id).unwrap();
        ticker.update();

        token.cancel();
        clock.advance(Duration::from_millis(500));
        assert_eq!(ticker.update(), vec![TickerEvent::Cancelled(id)]);
        assert_eq!(label.get(), "0");
    }

    #[test]
    fn test_cancel_all_and_clear() {
        let (mut ticker, _clock) = manual_ticker();
        let a = Rc::new(TextCell::new("0"));
        let b = Rc::new(TextCell::new("0"));

        let first = ticker.animate(&a, 1);
        let second = ticker.animate(&b, 2);
        ticker.update();
        assert_eq!(ticker.active_count(), 2);

        ticker.cancel_all();
        assert_eq!(
            ticker.update(),
            vec![TickerEvent::Cancelled(first), TickerEvent::Cancelled(second)]
        );

        ticker.animate(&a, 1);
        ticker.clear();
        assert_eq!(ticker.active_count(), 0);
        assert!(ticker.update().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let (mut ticker, clock) = manual_ticker();
        let temperature = Rc::new(TextCell::new("Temperature: 98 F"));
        let distance = Rc::new(TextCell::new("29.19 meters"));

        ticker.animate_with_duration(&temperature, 23, 1.0, AnimationOptions::new());
        ticker.animate_with_duration(&distance, 10009.3, 2.0, AnimationOptions::new());
        ticker.update();

        clock.advance(Duration::from_millis(1500));
        ticker.update();
        assert_eq!(temperature.get(), "Temperature: 23 F");
        assert_eq!(ticker.active_count(), 1);

        clock.advance(Duration::from_millis(1000));
        ticker.update();
        assert_eq!(distance.get(), "10009.3 meters");
        assert_eq!(temperature.get(), "Temperature: 23 F");
    }

    #[test]
    fn test_callbacks_follow_session_order() {
        let (mut ticker, clock) = manual_ticker();
        let order = Rc::new(RefCell::new(Vec::new()));
        let labels: Vec<Rc<TextCell>> = (0..16).map(|_| Rc::new(TextCell::new("0"))).collect();

        let mut ids = Vec::new();
        for (index, label) in labels.iter().enumerate() {
            let sink = order.clone();
            ids.push(ticker.animate_with_completion(
                label,
                index as i64,
                0.5,
                AnimationOptions::new(),
                move || sink.borrow_mut().push(index),
            ));
        }
        ticker.update();

        clock.advance(Duration::from_secs(1));
        let events = ticker.update();

        let expected: Vec<TickerEvent> = ids.iter().copied().map(TickerEvent::Completed).collect();
        assert_eq!(events, expected);
        assert_eq!(*order.borrow(), (0..16).collect::<Vec<usize>>());
    }
}
