//! 调度事件
//!
//! 定义调度事件结构及其优先级比较。

use super::event::Event;
use super::time::SimTime;
use std::cmp::Ordering;

/// 调度事件，包含执行时间、序列号和事件记录。
#[derive(Debug)]
pub struct ScheduledEvent {
    pub(crate) seq: u64,
    pub(crate) ev: Event,
}

impl ScheduledEvent {
    /// 排序键：先按时间，再按事件类型的同刻顺序，最后按入队顺序（FIFO）。
    pub fn key(&self) -> (SimTime, u8, u64) {
        (self.ev.time, self.ev.kind.tie_rank(), self.seq)
    }
}

// BinaryHeap 是 max-heap；键越小优先级越高，所以用 other 与 self 比较。
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}
