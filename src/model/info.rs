//! 模型描述信息
//!
//! 由外部解析得到的标识符和维度。

use serde::{Deserialize, Serialize};

/// 已解析的模型描述（标识符与向量维度）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub identifier: String,
    pub guid: String,
    /// 连续状态数 nx
    pub num_states: usize,
    /// 事件指示器数 nz
    pub num_event_indicators: usize,
}

impl ModelInfo {
    pub fn new(
        identifier: impl Into<String>,
        guid: impl Into<String>,
        num_states: usize,
        num_event_indicators: usize,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            guid: guid.into(),
            num_states,
            num_event_indicators,
        }
    }
}
