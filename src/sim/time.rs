//! 仿真时钟
//!
//! 维护当前仿真时间与结束时间，保证时间单调不减且不超过结束时间。

/// 仿真时钟：`start <= now <= end`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    now: f64,
    end: f64,
}

impl SimClock {
    pub fn new(start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "start time after end time");
        Self { now: start, end }
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_done(&self) -> bool {
        self.now >= self.end
    }

    /// 固定步长下的候选下一时刻，不超过结束时间
    pub fn candidate(&self, step_size: f64) -> f64 {
        (self.now + step_size).min(self.end)
    }

    /// 前进到 `to`，返回实际步长 `dt`。
    pub fn advance_to(&mut self, to: f64) -> f64 {
        debug_assert!(to >= self.now && to <= self.end, "clock must not move backwards or past end");
        let dt = to - self.now;
        self.now = to;
        dt
    }

    /// 在当前时间停止（结束时间收缩为当前时间）
    pub fn stop(&mut self) {
        self.end = self.now;
    }
}
