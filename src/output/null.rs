//! 空输出（不写任何结果，用于精确计时）

use std::io;

use super::RowSink;

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RowSink for NullSink {
    fn header(&mut self, _names: &[String]) -> io::Result<()> {
        Ok(())
    }

    fn row(&mut self, _time: f64, _values: &[f64]) -> io::Result<()> {
        Ok(())
    }
}
