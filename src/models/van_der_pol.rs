//! Van der Pol 振荡器
//!
//! `x0' = x1`，`x1' = mu * (1 - x0^2) * x1 - x0`

use super::Equations;
use crate::model::{EventInfo, ModelInfo};

#[derive(Debug, Clone)]
pub struct VanDerPol {
    pub x0: f64,
    pub x1: f64,
    pub mu: f64,
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self {
            x0: 2.0,
            x1: 0.0,
            mu: 1.0,
        }
    }
}

impl VanDerPol {
    fn der(&self) -> [f64; 2] {
        [self.x1, self.mu * (1.0 - self.x0 * self.x0) * self.x1 - self.x0]
    }
}

impl Equations for VanDerPol {
    fn describe() -> ModelInfo {
        ModelInfo::new("vanDerPol", "{8c4e810f-3df3-4a00-8276-176fa3c9f000}", 2, 0)
    }

    fn output_names(&self) -> Vec<String> {
        ["x0", "der(x0)", "x1", "der(x1)", "mu"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn initialize(&mut self, _time: f64, _event_info: &mut EventInfo) {}

    fn states(&self, x: &mut [f64]) {
        x[0] = self.x0;
        x[1] = self.x1;
    }

    fn set_states(&mut self, x: &[f64]) {
        self.x0 = x[0];
        self.x1 = x[1];
    }

    fn derivatives(&self, _time: f64, dx: &mut [f64]) {
        dx.copy_from_slice(&self.der());
    }

    fn outputs(&self, _time: f64, values: &mut [f64]) {
        let [d0, d1] = self.der();
        values.copy_from_slice(&[self.x0, d0, self.x1, d1, self.mu]);
    }
}
