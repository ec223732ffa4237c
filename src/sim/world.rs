//! 世界 trait
//!
//! 定义仿真世界接口。

use super::event::Event;
use super::simulator::Simulator;
use crate::error::SimResult;

/// 仿真世界：由业务层实现（例如网状网络拓扑/统计等）。
pub trait World {
    /// 处理一个已出队的事件，可向 `sim` 调度后续事件。
    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> SimResult<()>;

    /// 每处理完一个事件后调用一次。
    fn on_tick(&mut self, _sim: &mut Simulator) -> SimResult<()> {
        Ok(())
    }

    /// 是否已达到仿真边界（时间上限、数据包上限等）。
    fn is_done(&self, _sim: &Simulator) -> bool {
        false
    }
}
