//! 输出作用域守卫
//!
//! 保证输出在所有退出路径上被关闭；失败路径上的关闭错误只记录日志。

use std::io;
use std::ops::{Deref, DerefMut};

use tracing::warn;

use super::RowSink;

pub struct SinkGuard<'s, S: RowSink + ?Sized> {
    sink: &'s mut S,
    closed: bool,
}

impl<'s, S: RowSink + ?Sized> SinkGuard<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self { sink, closed: false }
    }

    /// 显式关闭，返回关闭错误
    pub fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        self.sink.close()
    }
}

impl<S: RowSink + ?Sized> Deref for SinkGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.sink
    }
}

impl<S: RowSink + ?Sized> DerefMut for SinkGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.sink
    }
}

impl<S: RowSink + ?Sized> Drop for SinkGuard<'_, S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.sink.close() {
            warn!(%err, "关闭输出失败");
        }
    }
}
