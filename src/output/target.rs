//! 输出目标
//!
//! 结果文件参数：`-` 表示标准输出，空字符串表示不输出，其他值为文件路径。

use std::fs::File;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CsvSink, NullSink, RowSink};
use crate::sim::SimError;

/// 结果写到哪里
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// 不输出
    Disabled,
    File(PathBuf),
}

impl OutputTarget {
    /// 按经典的结果文件参数解析
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "-" => OutputTarget::Stdout,
            "" => OutputTarget::Disabled,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// 打开输出；文件无法创建时返回获取阶段错误
    pub fn open(&self, separator: char) -> Result<Box<dyn RowSink>, SimError> {
        debug!(output = ?self, "打开输出");
        let sink: Box<dyn RowSink> = match self {
            OutputTarget::Stdout => Box::new(CsvSink::new(io::stdout(), separator)),
            OutputTarget::Disabled => Box::new(NullSink),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| SimError::OpenOutput {
                    path: path.clone(),
                    source,
                })?;
                Box::new(CsvSink::new(file, separator))
            }
        };
        Ok(sink)
    }
}
