//! 事件检测
//!
//! 判断刚完成的一步中是否发生时间事件或状态事件（事件指示器符号变化）。

use crate::model::EventInfo;

/// 待处理的时间事件是否落在候选步内（严格早于候选时刻）
pub fn detect_time_event(event_info: &EventInfo, candidate: f64) -> bool {
    event_info
        .pending_time_event()
        .is_some_and(|at| at < candidate)
}

/// 是否有任一指示器严格变号（`previous[i] * current[i] < 0`）。
///
/// 从正数变为恰好 0 或保持 0 都不算。
pub fn detect_state_event(previous: &[f64], current: &[f64]) -> bool {
    debug_assert_eq!(previous.len(), current.len());
    previous.iter().zip(current).any(|(p, c)| p * c < 0.0)
}

/// 过零方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// 由正变负（`-\-`）
    Falling,
    /// 由负变正（`-/-`）
    Rising,
}

impl Crossing {
    pub fn symbol(self) -> &'static str {
        match self {
            Crossing::Falling => "-\\-",
            Crossing::Rising => "-/-",
        }
    }
}

/// 列出所有变号的指示器下标及方向
pub fn crossings<'a>(
    previous: &'a [f64],
    current: &'a [f64],
) -> impl Iterator<Item = (usize, Crossing)> + 'a {
    previous
        .iter()
        .zip(current)
        .enumerate()
        .filter(|(_, (p, c))| *p * *c < 0.0)
        .map(|(i, (p, _))| {
            let dir = if *p > 0.0 {
                Crossing::Falling
            } else {
                Crossing::Rising
            };
            (i, dir)
        })
}

/// 事件指示器双缓冲：保存上一代与当前代采样。
///
/// 在第二次采样之前不会报告状态事件，上一代永远来自真实采样而不是零初始化内存。
#[derive(Debug, Clone)]
pub struct IndicatorBuffer {
    gens: [Vec<f64>; 2],
    current: usize,
    samples: u64,
}

impl IndicatorBuffer {
    pub fn new(nz: usize) -> Self {
        Self {
            gens: [vec![0.0; nz], vec![0.0; nz]],
            current: 0,
            samples: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.gens[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 开始新一代采样：当前代变为上一代，返回待写入的缓冲区。
    ///
    /// 调用方写入后必须调用 [`IndicatorBuffer::commit`]。
    pub fn next_sample(&mut self) -> &mut [f64] {
        self.current ^= 1;
        &mut self.gens[self.current]
    }

    /// 确认刚写入的一代为有效采样
    pub fn commit(&mut self) {
        self.samples = self.samples.saturating_add(1);
    }

    pub fn previous(&self) -> &[f64] {
        &self.gens[self.current ^ 1]
    }

    pub fn current(&self) -> &[f64] {
        &self.gens[self.current]
    }

    /// 两代采样之间是否发生状态事件；nz = 0 时恒为 false
    pub fn state_event(&self) -> bool {
        if self.is_empty() || self.samples < 2 {
            return false;
        }
        detect_state_event(self.previous(), self.current())
    }

    pub fn crossings(&self) -> impl Iterator<Item = (usize, Crossing)> + '_ {
        let primed = self.samples >= 2;
        crossings(self.previous(), self.current()).filter(move |_| primed)
    }
}
