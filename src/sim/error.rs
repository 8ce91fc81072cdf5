//! 仿真错误
//!
//! 获取阶段错误、模型操作错误与输出错误都是致命的，在检测点上报一次。

use std::io;
use std::path::PathBuf;

use crate::model::Status;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read configuration {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not write {path}: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not {op} at t={time} (status {status})")]
    Operation {
        op: &'static str,
        time: f64,
        status: Status,
    },

    #[error("number of {what} changed from {expected} to {actual} at t={time}")]
    DimensionChanged {
        what: &'static str,
        expected: usize,
        actual: usize,
        time: f64,
    },

    #[error("could not write result row: {0}")]
    Output(#[from] io::Error),
}
