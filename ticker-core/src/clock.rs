//! # Clock 模块
//!
//! 为 [`Ticker`](crate::Ticker) 提供时间戳。
//!
//! 宿主通常使用 [`SystemClock`]；测试与无界面演示使用 [`ManualClock`]
//! 手动推进时间，保证帧序列可复现。

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// 时间源
pub trait Clock {
    /// 当前时间
    fn now(&self) -> Instant;
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 手动推进的时钟
///
/// 克隆出的句柄共享同一个时间点。
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// 从当前系统时间开始
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// 从指定时间开始
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// 推进时间
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// 设置时间
    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));

        clock.set(start);
        assert_eq!(handle.now(), start);
    }
}
