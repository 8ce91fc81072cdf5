//! 积分器
//!
//! 固定步长显式积分。目前只有 forward Euler：
//!
//! ```text
//! x_{n+1} = x_n + dt * xdot_n
//! ```

/// 连续状态积分器抽象
pub trait Integrator: std::fmt::Debug {
    /// 原地推进一步：`state` 被更新为新状态
    fn step(&self, state: &mut [f64], derivatives: &[f64], dt: f64);

    /// 返回新状态，不修改输入
    fn advance(&self, state: &[f64], derivatives: &[f64], dt: f64) -> Vec<f64> {
        let mut next = state.to_vec();
        self.step(&mut next, derivatives, dt);
        next
    }
}

/// 显式（前向）Euler 方法
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step(&self, state: &mut [f64], derivatives: &[f64], dt: f64) {
        assert_eq!(
            state.len(),
            derivatives.len(),
            "state and derivative vectors must have the same length"
        );
        for (x, xdot) in state.iter_mut().zip(derivatives) {
            *x += dt * xdot;
        }
    }
}
