use std::collections::VecDeque;

use crate::types::{Axis, Sample};

/// 默认窗口长度（每轴保留的样本数）
pub const DEFAULT_CAPACITY: usize = 50;

/// 单轴定长缓冲区，最旧的数据在队首
#[derive(Debug, Clone)]
pub struct AxisBuffer {
    values: VecDeque<f64>,
    capacity: usize,
}

impl AxisBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);

        // 超过容量时从队首淘汰 - O(1)操作
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// 返回当前缓冲区的副本，调用方修改副本不影响内部状态
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Last `capacity` samples, kept as three parallel per-axis sequences.
///
/// All three buffers are pushed together, so their lengths never diverge.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    xs: AxisBuffer,
    ys: AxisBuffer,
    zs: AxisBuffer,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            xs: AxisBuffer::new(capacity),
            ys: AxisBuffer::new(capacity),
            zs: AxisBuffer::new(capacity),
        }
    }

    pub fn push(&mut self, sample: &Sample) {
        self.xs.push(sample.x);
        self.ys.push(sample.y);
        self.zs.push(sample.z);
    }

    pub fn latest(&self) -> Option<Sample> {
        match (self.xs.latest(), self.ys.latest(), self.zs.latest()) {
            (Some(x), Some(y), Some(z)) => Some(Sample::new(x, y, z)),
            _ => None,
        }
    }

    pub fn snapshot(&self, axis: Axis) -> Vec<f64> {
        self.buffer(axis).snapshot()
    }

    pub fn buffer(&self, axis: Axis) -> &AxisBuffer {
        match axis {
            Axis::X => &self.xs,
            Axis::Y => &self.ys,
            Axis::Z => &self.zs,
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.xs.capacity
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
