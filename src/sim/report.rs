//! 运行报告
//!
//! 统计信息、结束原因与墙钟耗时；`Display` 输出经典的多行摘要。

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::stats::StepStatistics;

/// 仿真结束原因
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// 仿真时间到达结束时间
    EndTimeReached,
    /// 模型在初始化或离散更新时请求结束
    ModelRequested { at: f64 },
    /// 初始化失败，在当前时间结束
    InitializationFailed { at: f64 },
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub model: String,
    pub start_time: f64,
    /// 实际到达的仿真时间
    pub stop_time: f64,
    pub step_size: f64,
    pub stats: StepStatistics,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.termination {
            Termination::InitializationFailed { at } => writeln!(
                f,
                "Simulation from {} to {} stopped: model initialization failed",
                self.start_time, at
            )?,
            _ => writeln!(
                f,
                "Simulation from {} to {} terminated successful",
                self.start_time, self.stop_time
            )?,
        }
        writeln!(f, "  steps ............ {}", self.stats.steps)?;
        writeln!(f, "  fixed step size .. {}", self.step_size)?;
        writeln!(f, "  time events ...... {}", self.stats.time_events)?;
        writeln!(f, "  state events ..... {}", self.stats.state_events)?;
        writeln!(f, "  step events ...... {}", self.stats.step_events)?;
        write!(
            f,
            "  simulation time .. {} seconds",
            self.elapsed.as_secs_f64()
        )
    }
}
