//! 模型能力接口
//!
//! 仿真核心只通过 [`Model`] trait 与模型交互，不关心模型是如何加载的。

mod event_info;
mod info;
mod instance;
mod status;

pub use event_info::EventInfo;
pub use info::ModelInfo;
pub use instance::{Instance, Model};
pub use status::Status;
