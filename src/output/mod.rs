//! 结果输出
//!
//! 仿真循环按仿真时间顺序把每一行结果交给 [`RowSink`]：先一行列名，然后每步一行数值。

use std::io;

mod csv;
mod guard;
mod null;
mod target;

pub use csv::{CsvSink, format_real};
pub use guard::SinkGuard;
pub use null::NullSink;
pub use target::OutputTarget;

/// 结果行接收者
pub trait RowSink {
    /// 列名行（`time` 之后的输出变量名）
    fn header(&mut self, names: &[String]) -> io::Result<()>;
    /// 一行数值：仿真时间后接输出值
    fn row(&mut self, time: f64, values: &[f64]) -> io::Result<()>;
    /// 刷新并关闭
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn header(&mut self, names: &[String]) -> io::Result<()> {
        (**self).header(names)
    }

    fn row(&mut self, time: f64, values: &[f64]) -> io::Result<()> {
        (**self).row(time, values)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
