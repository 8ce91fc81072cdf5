use crate::model::{EventInfo, Model, ModelInfo, Status};
use crate::output::RowSink;
use std::io;

type IndicatorFn = Box<dyn Fn(f64, &[f64]) -> Vec<f64>>;

/// 可编排的测试替身：常数导数、可配置的指示器、时间事件表，并记录所有调用。
pub(crate) struct ScriptedModel {
    pub info: ModelInfo,
    pub time: f64,
    pub x: Vec<f64>,
    pub xdot: Vec<f64>,
    pub indicator: Option<IndicatorFn>,
    /// 依次调度的时间事件
    pub time_events: Vec<f64>,
    pub terminate_at_init: bool,
    /// 第 n 次（从 1 开始）离散更新时请求结束
    pub terminate_on_update: Option<usize>,
    /// 第 n 次（从 1 开始）completed_integrator_step 报告步事件
    pub step_event_on: Vec<usize>,
    pub init_status: Status,
    pub fail_op: Option<(&'static str, Status)>,
    pub resize_on_update: bool,

    pub set_times: Vec<f64>,
    pub completed_steps: usize,
    pub event_updates: usize,
    pub update_times: Vec<f64>,
    pub terminated: bool,
    pub freed: bool,
}

impl ScriptedModel {
    pub fn new(nx: usize, nz: usize) -> Self {
        Self {
            info: ModelInfo::new("scripted", "{test}", nx, nz),
            time: 0.0,
            x: vec![0.0; nx],
            xdot: vec![0.0; nx],
            indicator: None,
            time_events: Vec::new(),
            terminate_at_init: false,
            terminate_on_update: None,
            step_event_on: Vec::new(),
            init_status: Status::Ok,
            fail_op: None,
            resize_on_update: false,
            set_times: Vec::new(),
            completed_steps: 0,
            event_updates: 0,
            update_times: Vec::new(),
            terminated: false,
            freed: false,
        }
    }

    pub fn with_derivatives(mut self, xdot: &[f64]) -> Self {
        self.xdot = xdot.to_vec();
        self
    }

    pub fn with_indicator(mut self, f: impl Fn(f64, &[f64]) -> Vec<f64> + 'static) -> Self {
        self.indicator = Some(Box::new(f));
        self
    }

    fn status_for(&self, op: &'static str) -> Status {
        match self.fail_op {
            Some((failing, status)) if failing == op => status,
            _ => Status::Ok,
        }
    }

    fn schedule_next(&mut self, event_info: &mut EventInfo) {
        let now = self.time;
        self.time_events.retain(|at| *at > now);
        match self.time_events.first() {
            Some(at) => event_info.schedule_time_event(*at),
            None => event_info.clear_time_event(),
        }
    }
}

impl Model for ScriptedModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn output_names(&self) -> Vec<String> {
        (0..self.x.len()).map(|i| format!("x{i}")).collect()
    }

    fn set_time(&mut self, time: f64) -> Status {
        self.set_times.push(time);
        self.time = time;
        self.status_for("set_time")
    }

    fn initialize(&mut self, _tc: bool, _tol: f64, event_info: &mut EventInfo) -> Status {
        *event_info = EventInfo::default();
        event_info.terminate_simulation = self.terminate_at_init;
        self.schedule_next(event_info);
        self.init_status
    }

    fn get_continuous_states(&mut self, x: &mut [f64]) -> Status {
        x.copy_from_slice(&self.x);
        self.status_for("get_continuous_states")
    }

    fn set_continuous_states(&mut self, x: &[f64]) -> Status {
        self.x.copy_from_slice(x);
        self.status_for("set_continuous_states")
    }

    fn get_derivatives(&mut self, dx: &mut [f64]) -> Status {
        dx.copy_from_slice(&self.xdot);
        self.status_for("get_derivatives")
    }

    fn get_event_indicators(&mut self, z: &mut [f64]) -> Status {
        if let Some(f) = &self.indicator {
            z.copy_from_slice(&f(self.time, &self.x));
        }
        self.status_for("get_event_indicators")
    }

    fn completed_integrator_step(&mut self, step_event: &mut bool) -> Status {
        self.completed_steps += 1;
        *step_event = self.step_event_on.contains(&self.completed_steps);
        self.status_for("completed_integrator_step")
    }

    fn event_update(&mut self, _intermediate: bool, event_info: &mut EventInfo) -> Status {
        self.event_updates += 1;
        self.update_times.push(self.time);
        event_info.state_values_changed = false;
        event_info.state_value_references_changed = false;
        event_info.terminate_simulation = self.terminate_on_update == Some(self.event_updates);
        if self.resize_on_update {
            self.info.num_states += 1;
            event_info.state_value_references_changed = true;
        }
        self.schedule_next(event_info);
        self.status_for("event_update")
    }

    fn get_outputs(&mut self, values: &mut [f64]) -> Status {
        values.copy_from_slice(&self.x);
        self.status_for("get_outputs")
    }

    fn terminate(&mut self) -> Status {
        self.terminated = true;
        self.status_for("terminate")
    }

    fn free_instance(&mut self) {
        self.freed = true;
    }
}

/// 记录所有行的输出
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub header: Option<Vec<String>>,
    pub rows: Vec<(f64, Vec<f64>)>,
    pub closed: bool,
}

impl RecordingSink {
    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|(t, _)| *t).collect()
    }
}

impl RowSink for RecordingSink {
    fn header(&mut self, names: &[String]) -> io::Result<()> {
        self.header = Some(names.to_vec());
        Ok(())
    }

    fn row(&mut self, time: f64, values: &[f64]) -> io::Result<()> {
        self.rows.push((time, values.to_vec()));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// 转发给内部模型，并记录每次离散更新发生的时刻
pub(crate) struct UpdateLog<M> {
    pub inner: M,
    pub update_times: Vec<f64>,
    time: f64,
}

impl<M: Model> UpdateLog<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            update_times: Vec::new(),
            time: 0.0,
        }
    }
}

impl<M: Model> Model for UpdateLog<M> {
    fn info(&self) -> &ModelInfo {
        self.inner.info()
    }

    fn output_names(&self) -> Vec<String> {
        self.inner.output_names()
    }

    fn set_time(&mut self, time: f64) -> Status {
        self.time = time;
        self.inner.set_time(time)
    }

    fn initialize(&mut self, tc: bool, tol: f64, event_info: &mut EventInfo) -> Status {
        self.inner.initialize(tc, tol, event_info)
    }

    fn get_continuous_states(&mut self, x: &mut [f64]) -> Status {
        self.inner.get_continuous_states(x)
    }

    fn set_continuous_states(&mut self, x: &[f64]) -> Status {
        self.inner.set_continuous_states(x)
    }

    fn get_derivatives(&mut self, dx: &mut [f64]) -> Status {
        self.inner.get_derivatives(dx)
    }

    fn get_event_indicators(&mut self, z: &mut [f64]) -> Status {
        self.inner.get_event_indicators(z)
    }

    fn completed_integrator_step(&mut self, step_event: &mut bool) -> Status {
        self.inner.completed_integrator_step(step_event)
    }

    fn event_update(&mut self, intermediate: bool, event_info: &mut EventInfo) -> Status {
        self.update_times.push(self.time);
        self.inner.event_update(intermediate, event_info)
    }

    fn get_outputs(&mut self, values: &mut [f64]) -> Status {
        self.inner.get_outputs(values)
    }

    fn terminate(&mut self) -> Status {
        self.inner.terminate()
    }

    fn free_instance(&mut self) {
        self.inner.free_instance();
    }
}
