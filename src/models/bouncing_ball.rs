//! 弹跳球
//!
//! 状态 (h, v)，事件指示器为带符号的高度 ±h。落地时球放回地面，速度反向并按恢复系数衰减，
//! 反弹速度低于 `V_MIN` 时球停止。每次反弹翻转指示器符号，反弹后的上升不构成新的过零。

use super::Equations;
use crate::model::{EventInfo, ModelInfo};

const V_MIN: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct BouncingBall {
    pub h: f64,
    pub v: f64,
    /// 重力加速度
    pub g: f64,
    /// 恢复系数
    pub e: f64,
    /// 指示器当前取 -h
    pub flipped: bool,
}

impl Default for BouncingBall {
    fn default() -> Self {
        Self {
            h: 1.0,
            v: 0.0,
            g: 9.81,
            e: 0.7,
            flipped: false,
        }
    }
}

impl Equations for BouncingBall {
    fn describe() -> ModelInfo {
        ModelInfo::new("bouncingBall", "{8c4e810f-3df3-4a00-8276-176fa3c9f003}", 2, 1)
    }

    fn output_names(&self) -> Vec<String> {
        ["h", "der(h)", "v", "der(v)", "g", "e"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn initialize(&mut self, _time: f64, event_info: &mut EventInfo) {
        event_info.clear_time_event();
    }

    fn states(&self, x: &mut [f64]) {
        x[0] = self.h;
        x[1] = self.v;
    }

    fn set_states(&mut self, x: &[f64]) {
        self.h = x[0];
        self.v = x[1];
    }

    fn derivatives(&self, _time: f64, dx: &mut [f64]) {
        dx[0] = self.v;
        dx[1] = -self.g;
    }

    fn indicators(&self, z: &mut [f64]) {
        z[0] = if self.flipped { -self.h } else { self.h };
    }

    fn event_update(&mut self, _time: f64, event_info: &mut EventInfo) {
        if self.h > 0.0 || self.v >= 0.0 {
            return;
        }
        // 事件只在步末检测，此时球已穿过地面
        self.h = 0.0;
        let rebound = -self.e * self.v;
        if rebound < V_MIN {
            // 停止弹跳
            self.v = 0.0;
            self.g = 0.0;
        } else {
            self.v = rebound;
        }
        self.flipped = !self.flipped;
        event_info.state_values_changed = true;
    }

    fn outputs(&self, _time: f64, values: &mut [f64]) {
        values.copy_from_slice(&[self.h, self.v, self.v, -self.g, self.g, self.e]);
    }
}
