//! 仿真器
//!
//! 固定步长仿真循环：推进时间、对齐时间事件、检测状态事件，并按协议调用模型的离散更新。
//!
//! 状态事件只在一个完整的 Euler 步结束时检测，因此可能比真实发生时刻晚报告。

use std::time::Instant;

use super::config::RunConfig;
use super::error::SimError;
use super::event::{IndicatorBuffer, detect_time_event};
use super::integrator::{ForwardEuler, Integrator};
use super::report::{RunReport, Termination};
use super::stats::StepStatistics;
use super::time::SimClock;
use crate::model::{EventInfo, Instance, Model, Status};
use crate::output::{RowSink, SinkGuard};
use tracing::{error, info, warn};

/// 固定步长仿真器。只持有配置，每次运行的状态都在 [`Simulator::run`] 内部创建。
#[derive(Debug, Clone)]
pub struct Simulator<I = ForwardEuler> {
    config: RunConfig,
    integrator: I,
}

impl Simulator<ForwardEuler> {
    /// 使用 forward Euler 创建仿真器，配置无效时返回错误
    pub fn new(config: RunConfig) -> Result<Self, SimError> {
        Self::with_integrator(config, ForwardEuler)
    }
}

impl<I: Integrator> Simulator<I> {
    pub fn with_integrator(config: RunConfig, integrator: I) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config, integrator })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// 从开始时间运行到结束时间（或模型请求结束）。
    ///
    /// 无论成功、提前结束还是出错，模型实例都会被释放，输出都会被关闭。
    #[tracing::instrument(skip_all, fields(model = %model.info().identifier))]
    pub fn run<M, S>(&self, model: &mut M, sink: &mut S) -> Result<RunReport, SimError>
    where
        M: Model + ?Sized,
        S: RowSink + ?Sized,
    {
        info!(
            start = self.config.start_time,
            end = self.config.end_time,
            h = self.config.step_size,
            "▶️  开始运行仿真"
        );
        let started = Instant::now();

        let mut model = Instance::new(model);
        let mut sink = SinkGuard::new(sink);

        let mut run = Run::new(&self.config, &self.integrator, &mut *model, &mut *sink);
        let termination = run.drive()?;
        if !matches!(termination, Termination::InitializationFailed { .. }) {
            let status = run.model.terminate();
            run.ensure(status, "terminate model")?;
        }
        let stats = run.stats;
        let stop_time = run.clock.now();
        let identifier = run.model.info().identifier.clone();
        drop(run);

        sink.close()?;
        drop(model);

        let report = RunReport {
            model: identifier,
            start_time: self.config.start_time,
            stop_time,
            step_size: self.config.step_size,
            stats,
            termination,
            elapsed: started.elapsed(),
        };
        info!(
            steps = stats.steps,
            time_events = stats.time_events,
            state_events = stats.state_events,
            step_events = stats.step_events,
            final_time = stop_time,
            "✅ 仿真完成"
        );
        Ok(report)
    }
}

/// 单次运行的状态：时钟、向量与计数器，只在一次运行内存在。
struct Run<'r, I: ?Sized, M: ?Sized, S: ?Sized> {
    config: &'r RunConfig,
    integrator: &'r I,
    model: &'r mut M,
    sink: &'r mut S,
    clock: SimClock,
    event_info: EventInfo,
    stats: StepStatistics,
    nx: usize,
    nz: usize,
    x: Vec<f64>,
    xdot: Vec<f64>,
    indicators: IndicatorBuffer,
    outputs: Vec<f64>,
}

impl<'r, I, M, S> Run<'r, I, M, S>
where
    I: Integrator + ?Sized,
    M: Model + ?Sized,
    S: RowSink + ?Sized,
{
    fn new(config: &'r RunConfig, integrator: &'r I, model: &'r mut M, sink: &'r mut S) -> Self {
        let nx = model.info().num_states;
        let nz = model.info().num_event_indicators;
        let n_outputs = model.output_names().len();
        Self {
            config,
            integrator,
            model,
            sink,
            clock: SimClock::new(config.start_time, config.end_time),
            event_info: EventInfo::default(),
            stats: StepStatistics::default(),
            nx,
            nz,
            x: vec![0.0; nx],
            xdot: vec![0.0; nx],
            indicators: IndicatorBuffer::new(nz),
            outputs: vec![0.0; n_outputs],
        }
    }

    fn drive(&mut self) -> Result<Termination, SimError> {
        let early = self.initialize()?;

        let names = self.model.output_names();
        self.sink.header(&names)?;
        if let Some(termination) = early {
            if !matches!(termination, Termination::InitializationFailed { .. }) {
                self.emit_row()?;
            }
            return Ok(termination);
        }
        self.emit_row()?;

        while !self.clock.is_done() {
            if let Some(termination) = self.step()? {
                return Ok(termination);
            }
        }
        Ok(Termination::EndTimeReached)
    }

    /// 设置开始时间并初始化模型；初始化失败或模型请求结束时在当前时间结束。
    fn initialize(&mut self) -> Result<Option<Termination>, SimError> {
        let t0 = self.clock.now();
        let status = self.model.set_time(t0);
        self.ensure(status, "set time")?;

        let status = self.model.initialize(false, 0.0, &mut self.event_info);
        if status.is_failure() {
            error!(time = t0, %status, "could not initialize model");
            self.clock.stop();
            return Ok(Some(Termination::InitializationFailed { at: t0 }));
        }
        self.ensure(status, "initialize model")?;

        if self.event_info.terminate_simulation {
            warn!(time = t0, "model requested termination at init");
            self.clock.stop();
            return Ok(Some(Termination::ModelRequested { at: t0 }));
        }

        // 用真实的第一次采样作为“上一代”指示器
        self.sample_indicators()?;
        Ok(None)
    }

    /// 一个积分步；模型请求结束时返回 `Some`。
    fn step(&mut self) -> Result<Option<Termination>, SimError> {
        let status = self.model.get_continuous_states(&mut self.x);
        self.ensure(status, "retrieve states")?;
        let status = self.model.get_derivatives(&mut self.xdot);
        self.ensure(status, "retrieve derivatives")?;

        // 时间事件优先于固定步长网格
        let mut next = self.clock.candidate(self.config.step_size);
        let time_event = detect_time_event(&self.event_info, next);
        if time_event {
            next = self.event_info.next_event_time.max(self.clock.now());
        }
        let dt = self.clock.advance_to(next);
        let status = self.model.set_time(next);
        self.ensure(status, "set time")?;

        self.integrator.step(&mut self.x, &self.xdot, dt);
        let status = self.model.set_continuous_states(&self.x);
        self.ensure(status, "set states")?;
        if self.config.logging {
            info!(step = self.stats.steps, time = next, dt, "步进");
        }

        let mut step_event = false;
        let status = self.model.completed_integrator_step(&mut step_event);
        self.ensure(status, "complete integrator step")?;

        self.sample_indicators()?;
        let state_event = self.indicators.state_event();

        if time_event || state_event || step_event {
            self.count_events(time_event, state_event, step_event);

            // 一次事件迭代，忽略中间结果
            let status = self.model.event_update(false, &mut self.event_info);
            self.ensure(status, "perform event update")?;

            if self.event_info.terminate_simulation {
                warn!(time = next, "model requested termination");
                self.clock.stop();
                self.emit_row()?;
                self.stats.steps += 1;
                return Ok(Some(Termination::ModelRequested { at: next }));
            }
            if self.event_info.state_values_changed && self.config.logging {
                info!(time = next, "state values changed");
            }
            if self.event_info.state_value_references_changed {
                if self.config.logging {
                    info!(time = next, "new state variables selected");
                }
                self.check_dimensions()?;
            }
        }

        self.emit_row()?;
        self.stats.steps += 1;
        Ok(None)
    }

    fn count_events(&mut self, time_event: bool, state_event: bool, step_event: bool) {
        let now = self.clock.now();
        if time_event {
            self.stats.time_events += 1;
            if self.config.logging {
                info!(time = now, "time event");
            }
        }
        if state_event {
            self.stats.state_events += 1;
            if self.config.logging {
                for (i, dir) in self.indicators.crossings() {
                    info!(time = now, indicator = i, "state event {} z[{i}]", dir.symbol());
                }
            }
        }
        if step_event {
            self.stats.step_events += 1;
            if self.config.logging {
                info!(time = now, "step event");
            }
        }
    }

    fn sample_indicators(&mut self) -> Result<(), SimError> {
        if self.nz == 0 {
            return Ok(());
        }
        let status = self
            .model
            .get_event_indicators(self.indicators.next_sample());
        self.ensure(status, "retrieve event indicators")?;
        self.indicators.commit();
        Ok(())
    }

    /// 不支持运行中改变向量维度：发现变化立即失败
    fn check_dimensions(&self) -> Result<(), SimError> {
        let info = self.model.info();
        let time = self.clock.now();
        if info.num_states != self.nx {
            return Err(SimError::DimensionChanged {
                what: "states",
                expected: self.nx,
                actual: info.num_states,
                time,
            });
        }
        if info.num_event_indicators != self.nz {
            return Err(SimError::DimensionChanged {
                what: "event indicators",
                expected: self.nz,
                actual: info.num_event_indicators,
                time,
            });
        }
        Ok(())
    }

    fn emit_row(&mut self) -> Result<(), SimError> {
        let status = self.model.get_outputs(&mut self.outputs);
        self.ensure(status, "retrieve outputs")?;
        self.sink.row(self.clock.now(), &self.outputs)?;
        Ok(())
    }

    /// 比 warning 更严重的状态中止运行；warning 在开启日志时记录后继续
    fn ensure(&self, status: Status, op: &'static str) -> Result<(), SimError> {
        let time = self.clock.now();
        if status == Status::Warning && self.config.logging {
            warn!(op, time, "model returned a warning");
        }
        status.check(op, time).inspect_err(|err| {
            error!(%err, "模型操作失败，中止仿真");
        })
    }
}
