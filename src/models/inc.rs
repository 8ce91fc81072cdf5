//! 计数器模型
//!
//! 没有连续状态。每隔 1 个时间单位触发一次时间事件使计数器加一，计数到 13 时请求结束仿真。

use super::Equations;
use crate::model::{EventInfo, ModelInfo};

const PERIOD: f64 = 1.0;
const LAST: i64 = 13;

#[derive(Debug, Clone)]
pub struct Inc {
    pub counter: i64,
}

impl Default for Inc {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl Equations for Inc {
    fn describe() -> ModelInfo {
        ModelInfo::new("inc", "{8c4e810f-3df3-4a00-8276-176fa3c9f008}", 0, 0)
    }

    fn output_names(&self) -> Vec<String> {
        vec!["counter".into()]
    }

    fn initialize(&mut self, time: f64, event_info: &mut EventInfo) {
        event_info.schedule_time_event(time + PERIOD);
    }

    fn event_update(&mut self, time: f64, event_info: &mut EventInfo) {
        self.counter += 1;
        if self.counter == LAST {
            event_info.terminate_simulation = true;
            event_info.clear_time_event();
        } else {
            event_info.schedule_time_event(time + PERIOD);
        }
    }

    fn outputs(&self, _time: f64, values: &mut [f64]) {
        values[0] = self.counter as f64;
    }
}
