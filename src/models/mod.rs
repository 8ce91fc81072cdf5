//! 内置模型
//!
//! 经典演示模型集合。每个模型只描述方程（[`Equations`]），实例协议由 [`BuiltIn`] 统一实现。

mod bouncing_ball;
mod dq;
mod inc;
mod values;
mod van_der_pol;

pub use bouncing_ball::BouncingBall;
pub use dq::Dq;
pub use inc::Inc;
pub use values::Values;
pub use van_der_pol::VanDerPol;

use crate::model::{EventInfo, Model, ModelInfo, Status};
use crate::sim::SimError;
use tracing::{debug, error};

/// 可用的内置模型名称
pub const NAMES: &[&str] = &["bouncing_ball", "dq", "inc", "values", "van_der_pol"];

/// 按名称创建模型实例
pub fn instantiate(name: &str, logging: bool) -> Result<Box<dyn Model>, SimError> {
    let model: Box<dyn Model> = match name {
        "bouncing_ball" => Box::new(BuiltIn::new(BouncingBall::default(), logging)),
        "dq" => Box::new(BuiltIn::new(Dq::default(), logging)),
        "inc" => Box::new(BuiltIn::new(Inc::default(), logging)),
        "values" => Box::new(BuiltIn::new(Values::default(), logging)),
        "van_der_pol" => Box::new(BuiltIn::new(VanDerPol::default(), logging)),
        other => return Err(SimError::UnknownModel(other.to_string())),
    };
    debug!(model = name, "已创建模型实例");
    Ok(model)
}

/// 模型方程：连续部分与离散更新
pub trait Equations {
    fn describe() -> ModelInfo
    where
        Self: Sized;

    fn output_names(&self) -> Vec<String>;

    /// 初始化离散状态，可在 `event_info` 中调度第一个时间事件
    fn initialize(&mut self, time: f64, event_info: &mut EventInfo);

    fn states(&self, _x: &mut [f64]) {}
    fn set_states(&mut self, _x: &[f64]) {}
    fn derivatives(&self, _time: f64, _dx: &mut [f64]) {}
    fn indicators(&self, _z: &mut [f64]) {}

    /// 离散更新；已到期的时间事件在调用前被清除
    fn event_update(&mut self, _time: f64, _event_info: &mut EventInfo) {}

    fn outputs(&self, time: f64, values: &mut [f64]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Instantiated,
    Initialized,
    Terminated,
    Freed,
}

/// 把 [`Equations`] 包装为满足实例协议的 [`Model`]
#[derive(Debug)]
pub struct BuiltIn<E> {
    info: ModelInfo,
    eq: E,
    time: f64,
    phase: Phase,
    logging: bool,
    n_outputs: usize,
}

impl<E: Equations> BuiltIn<E> {
    pub fn new(eq: E, logging: bool) -> Self {
        let n_outputs = eq.output_names().len();
        Self {
            info: E::describe(),
            eq,
            time: 0.0,
            phase: Phase::Instantiated,
            logging,
            n_outputs,
        }
    }

    pub fn equations(&self) -> &E {
        &self.eq
    }

    fn expect_phase(&self, op: &'static str, allowed: &[Phase]) -> bool {
        if allowed.contains(&self.phase) {
            return true;
        }
        error!(model = %self.info.identifier, op, phase = ?self.phase, "非法调用时机");
        false
    }

    fn expect_len(&self, op: &'static str, got: usize, want: usize) -> bool {
        if got == want {
            return true;
        }
        error!(model = %self.info.identifier, op, got, want, "向量长度不匹配");
        false
    }

    fn checked(&self, op: &'static str, got: usize, want: usize) -> bool {
        self.expect_phase(op, &[Phase::Initialized]) && self.expect_len(op, got, want)
    }
}

impl<E: Equations> Model for BuiltIn<E> {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn output_names(&self) -> Vec<String> {
        self.eq.output_names()
    }

    fn set_time(&mut self, time: f64) -> Status {
        if !self.expect_phase("set time", &[Phase::Instantiated, Phase::Initialized]) {
            return Status::Error;
        }
        self.time = time;
        Status::Ok
    }

    fn initialize(
        &mut self,
        _tolerance_controlled: bool,
        _relative_tolerance: f64,
        event_info: &mut EventInfo,
    ) -> Status {
        if !self.expect_phase("initialize", &[Phase::Instantiated]) {
            return Status::Error;
        }
        *event_info = EventInfo {
            iteration_converged: true,
            ..EventInfo::default()
        };
        self.eq.initialize(self.time, event_info);
        self.phase = Phase::Initialized;
        if self.logging {
            debug!(model = %self.info.identifier, time = self.time, ?event_info, "initialized");
        }
        Status::Ok
    }

    fn get_continuous_states(&mut self, x: &mut [f64]) -> Status {
        if !self.checked("get continuous states", x.len(), self.info.num_states) {
            return Status::Error;
        }
        self.eq.states(x);
        Status::Ok
    }

    fn set_continuous_states(&mut self, x: &[f64]) -> Status {
        let op = "set continuous states";
        if !(self.expect_phase(op, &[Phase::Instantiated, Phase::Initialized])
            && self.expect_len(op, x.len(), self.info.num_states))
        {
            return Status::Error;
        }
        self.eq.set_states(x);
        Status::Ok
    }

    fn get_derivatives(&mut self, dx: &mut [f64]) -> Status {
        if !self.checked("get derivatives", dx.len(), self.info.num_states) {
            return Status::Error;
        }
        self.eq.derivatives(self.time, dx);
        Status::Ok
    }

    fn get_event_indicators(&mut self, z: &mut [f64]) -> Status {
        if !self.checked("get event indicators", z.len(), self.info.num_event_indicators) {
            return Status::Error;
        }
        self.eq.indicators(z);
        Status::Ok
    }

    fn completed_integrator_step(&mut self, step_event: &mut bool) -> Status {
        if !self.expect_phase("completed integrator step", &[Phase::Initialized]) {
            return Status::Error;
        }
        *step_event = false;
        Status::Ok
    }

    fn event_update(&mut self, _intermediate_results: bool, event_info: &mut EventInfo) -> Status {
        if !self.expect_phase("event update", &[Phase::Initialized]) {
            return Status::Error;
        }
        event_info.iteration_converged = true;
        event_info.terminate_simulation = false;
        event_info.state_values_changed = false;
        event_info.state_value_references_changed = false;
        if event_info
            .pending_time_event()
            .is_some_and(|at| at <= self.time)
        {
            event_info.clear_time_event();
        }
        self.eq.event_update(self.time, event_info);
        if self.logging {
            debug!(model = %self.info.identifier, time = self.time, ?event_info, "event update");
        }
        Status::Ok
    }

    fn get_outputs(&mut self, values: &mut [f64]) -> Status {
        if !self.checked("get outputs", values.len(), self.n_outputs) {
            return Status::Error;
        }
        self.eq.outputs(self.time, values);
        Status::Ok
    }

    fn terminate(&mut self) -> Status {
        if !self.expect_phase("terminate", &[Phase::Initialized]) {
            return Status::Error;
        }
        self.phase = Phase::Terminated;
        Status::Ok
    }

    fn free_instance(&mut self) {
        self.phase = Phase::Freed;
    }
}
