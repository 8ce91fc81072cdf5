//! Dahlquist 测试方程 `x' = -k * x`

use super::Equations;
use crate::model::{EventInfo, ModelInfo};

#[derive(Debug, Clone)]
pub struct Dq {
    pub x: f64,
    pub k: f64,
}

impl Default for Dq {
    fn default() -> Self {
        Self { x: 1.0, k: 1.0 }
    }
}

impl Equations for Dq {
    fn describe() -> ModelInfo {
        ModelInfo::new("dq", "{8c4e810f-3df3-4a00-8276-176fa3c9f000}", 1, 0)
    }

    fn output_names(&self) -> Vec<String> {
        vec!["x".into(), "der(x)".into(), "k".into()]
    }

    fn initialize(&mut self, _time: f64, _event_info: &mut EventInfo) {}

    fn states(&self, x: &mut [f64]) {
        x[0] = self.x;
    }

    fn set_states(&mut self, x: &[f64]) {
        self.x = x[0];
    }

    fn derivatives(&self, _time: f64, dx: &mut [f64]) {
        dx[0] = -self.k * self.x;
    }

    fn outputs(&self, _time: f64, values: &mut [f64]) {
        values.copy_from_slice(&[self.x, -self.k * self.x, self.k]);
    }
}
