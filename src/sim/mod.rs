//! 仿真核心模块
//!
//! 此模块包含固定步长混合仿真的核心组件：仿真时钟、积分器、事件检测、统计和仿真循环。

// 子模块声明
mod config;
mod error;
mod event;
mod integrator;
mod report;
mod simulator;
mod stats;
mod time;

// 重新导出公共接口
pub use config::RunConfig;
pub use error::SimError;
pub use event::{Crossing, IndicatorBuffer, crossings, detect_state_event, detect_time_event};
pub use integrator::{ForwardEuler, Integrator};
pub use report::{RunReport, Termination};
pub use simulator::Simulator;
pub use stats::StepStatistics;
pub use time::SimClock;
