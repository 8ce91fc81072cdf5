//! 运行配置
//!
//! 结束时间、固定步长、日志开关、分隔符与输出目标；可从 JSON 文件读取任意子集。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::output::OutputTarget;

/// 仿真运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub start_time: f64,
    pub end_time: f64,
    /// 固定步长 h
    pub step_size: f64,
    pub logging: bool,
    /// CSV 列分隔符
    pub separator: char,
    pub output: OutputTarget,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 1.0,
            step_size: 0.1,
            logging: false,
            separator: ';',
            output: OutputTarget::Stdout,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SimError> {
        let raw = fs::read_to_string(path).map_err(|source| SimError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// 校验：步长为正、时间有限且 `end_time >= start_time`
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "start time ({}) and end time ({}) must be finite",
                self.start_time, self.end_time
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "step size must be positive, got {}",
                self.step_size
            )));
        }
        if self.end_time < self.start_time {
            return Err(SimError::InvalidConfig(format!(
                "end time {} is before start time {}",
                self.end_time, self.start_time
            )));
        }
        if self.separator == '\n' || self.separator == '\r' {
            return Err(SimError::InvalidConfig(
                "separator must not be a line break".to_string(),
            ));
        }
        Ok(())
    }
}
