//! 事件队列
//!
//! 按时间最小优先弹出事件的优先队列；时间相同时先按 `EventKind::tie_rank`，
//! 再按插入顺序弹出。

use std::collections::BinaryHeap;

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use crate::error::{SimError, SimResult};

#[derive(Debug, Default)]
pub struct EventQueue {
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    /// 插入事件，O(log n)
    pub fn push(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent { seq, ev });
    }

    /// 弹出时间最小的事件；队列为空时返回 `SimError::EmptyQueue`
    pub fn pop_min(&mut self) -> SimResult<Event> {
        self.q.pop().map(|item| item.ev).ok_or(SimError::EmptyQueue)
    }

    /// 队首事件的时间
    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(|item| item.ev.time)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}
