//! 模型调用状态
//!
//! 每个模型操作都返回一个状态，按严重程度排序。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::SimError;

/// 模型操作的返回状态（按严重程度从低到高排序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum Status {
    Ok,
    /// 可继续执行，但应记录日志
    Warning,
    Discard,
    Error,
    Fatal,
}

impl Status {
    /// 是否比 `Warning` 更严重（需要中止仿真）
    pub fn is_failure(self) -> bool {
        self > Status::Warning
    }

    /// 把比 `Warning` 更严重的状态转换为 [`SimError::Operation`]
    pub fn check(self, op: &'static str, time: f64) -> Result<(), SimError> {
        if self.is_failure() {
            Err(SimError::Operation {
                op,
                time,
                status: self,
            })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::Warning => "warning",
            Status::Discard => "discard",
            Status::Error => "error",
            Status::Fatal => "fatal",
        };
        f.write_str(s)
    }
}
