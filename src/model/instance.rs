//! 模型实例 trait 与作用域守卫
//!
//! 定义仿真循环消费的模型操作集合，以及保证实例在所有退出路径上被释放的守卫。

use std::ops::{Deref, DerefMut};

use tracing::debug;

use super::event_info::EventInfo;
use super::info::ModelInfo;
use super::status::Status;

/// 模型实例：由具体模型（内置模型、测试替身等）实现。
///
/// 所有向量都通过切片复制进出，模型内部表示不会被别名引用。
pub trait Model {
    fn info(&self) -> &ModelInfo;

    /// 输出列名（与 [`Model::get_outputs`] 的顺序一致）
    fn output_names(&self) -> Vec<String>;

    fn set_time(&mut self, time: f64) -> Status;

    /// 初始化模型，写入初始事件信息
    fn initialize(
        &mut self,
        tolerance_controlled: bool,
        relative_tolerance: f64,
        event_info: &mut EventInfo,
    ) -> Status;

    fn get_continuous_states(&mut self, x: &mut [f64]) -> Status;
    fn set_continuous_states(&mut self, x: &[f64]) -> Status;
    fn get_derivatives(&mut self, dx: &mut [f64]) -> Status;
    fn get_event_indicators(&mut self, z: &mut [f64]) -> Status;

    /// 通知模型一个积分步已完成；`step_event` 返回是否发生步事件
    fn completed_integrator_step(&mut self, step_event: &mut bool) -> Status;

    /// 离散更新（事件迭代），更新 `event_info`
    fn event_update(&mut self, intermediate_results: bool, event_info: &mut EventInfo) -> Status;

    fn get_outputs(&mut self, values: &mut [f64]) -> Status;

    fn terminate(&mut self) -> Status;

    /// 释放实例，之后不应再调用其他操作
    fn free_instance(&mut self);
}

/// 独占一个模型实例，离开作用域时释放它。
pub struct Instance<'m, M: Model + ?Sized> {
    model: &'m mut M,
}

impl<'m, M: Model + ?Sized> Instance<'m, M> {
    pub fn new(model: &'m mut M) -> Self {
        Self { model }
    }
}

impl<M: Model + ?Sized> Deref for Instance<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: Model + ?Sized> DerefMut for Instance<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: Model + ?Sized> Drop for Instance<'_, M> {
    fn drop(&mut self) {
        debug!(model = %self.model.info().identifier, "释放模型实例");
        self.model.free_instance();
    }
}
