//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::event_queue::EventQueue;
use super::time::SimTime;
use super::world::World;
use crate::error::SimResult;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Debug, Default)]
pub struct Simulator {
    now: SimTime,
    q: EventQueue,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 待处理事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 调度事件（执行时间取自 `ev.time`）
    pub fn schedule(&mut self, ev: Event) {
        trace!(now = ?self.now, at = ?ev.time, kind = ?ev.kind, "调度事件");
        debug_assert!(ev.time >= self.now, "event scheduled in the past");
        self.q.push(ev);
    }

    /// 运行直到事件队列为空或世界报告已到达边界。
    ///
    /// 边界在每次循环开始时检查一次；返回已处理的事件数。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> SimResult<u64> {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count = 0u64;
        while !self.q.is_empty() && !world.is_done(self) {
            let ev = self.q.pop_min()?;
            event_count += 1;
            self.now = ev.time;

            trace!(
                event_num = event_count,
                now = ?self.now,
                kind = ?ev.kind,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            world.handle(ev, self)?;
            world.on_tick(self)?;
        }

        info!(
            total_events = event_count,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
        Ok(event_count)
    }
}
