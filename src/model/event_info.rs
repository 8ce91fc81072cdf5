//! 事件信息
//!
//! 由 `initialize` 和 `event_update` 更新，待处理的时间事件会跨步保留。

use serde::{Deserialize, Serialize};

/// 模型在初始化/离散更新后返回的事件信息
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EventInfo {
    pub iteration_converged: bool,
    /// 模型请求结束仿真
    pub terminate_simulation: bool,
    pub state_values_changed: bool,
    /// 模型重新选择了状态变量
    pub state_value_references_changed: bool,
    pub upcoming_time_event: bool,
    /// 仅当 `upcoming_time_event` 为 true 时有意义
    pub next_event_time: f64,
}

impl EventInfo {
    /// 若存在待处理的时间事件，返回其计划时间
    pub fn pending_time_event(&self) -> Option<f64> {
        self.upcoming_time_event.then_some(self.next_event_time)
    }

    /// 调度一个时间事件
    pub fn schedule_time_event(&mut self, at: f64) {
        self.upcoming_time_event = true;
        self.next_event_time = at;
    }

    /// 清除待处理的时间事件
    pub fn clear_time_event(&mut self) {
        self.upcoming_time_event = false;
    }
}
