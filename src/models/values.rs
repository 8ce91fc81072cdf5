//! 离散输出模型
//!
//! `x' = 1`，每隔 1 个时间单位整数输出加一、布尔输出翻转。

use super::Equations;
use crate::model::{EventInfo, ModelInfo};

const PERIOD: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct Values {
    pub x: f64,
    pub int_out: i64,
    pub bool_out: bool,
}

impl Equations for Values {
    fn describe() -> ModelInfo {
        ModelInfo::new("values", "{8c4e810f-3df3-4a00-8276-176fa3c9f004}", 1, 0)
    }

    fn output_names(&self) -> Vec<String> {
        vec![
            "x".into(),
            "der(x)".into(),
            "int_out".into(),
            "bool_out".into(),
        ]
    }

    fn initialize(&mut self, time: f64, event_info: &mut EventInfo) {
        event_info.schedule_time_event(time + PERIOD);
    }

    fn states(&self, x: &mut [f64]) {
        x[0] = self.x;
    }

    fn set_states(&mut self, x: &[f64]) {
        self.x = x[0];
    }

    fn derivatives(&self, _time: f64, dx: &mut [f64]) {
        dx[0] = 1.0;
    }

    fn event_update(&mut self, time: f64, event_info: &mut EventInfo) {
        self.int_out += 1;
        self.bool_out = !self.bool_out;
        event_info.schedule_time_event(time + PERIOD);
    }

    fn outputs(&self, _time: f64, values: &mut [f64]) {
        let b = if self.bool_out { 1.0 } else { 0.0 };
        values.copy_from_slice(&[self.x, 1.0, self.int_out as f64, b]);
    }
}
