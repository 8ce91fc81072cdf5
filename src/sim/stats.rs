//! 步数与事件统计
//!
//! 整个运行期间单调递增，只在运行结束时读取。

use serde::{Deserialize, Serialize};

/// 仿真统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepStatistics {
    pub steps: u64,
    pub time_events: u64,
    pub state_events: u64,
    pub step_events: u64,
}
