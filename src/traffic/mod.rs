//! 流量生成
//!
//! 引擎只需要一个按时间单调递增地产生 `(time, source, destination)` 的生成器。

mod poisson;
mod scripted;

pub use poisson::PoissonTraffic;
pub use scripted::ScriptedTraffic;

use rand::rngs::StdRng;
use std::fmt;

use crate::error::SimResult;
use crate::mesh::{RouterId, Topology};
use crate::sim::SimTime;

/// 一次数据包到达
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub time: SimTime,
    pub source: RouterId,
    pub destination: RouterId,
}

/// 流量生成器接口
pub trait TrafficGenerator: fmt::Debug + Send {
    /// 产生 `after` 之后的下一个到达；`None` 表示不再有新流量。
    fn next_arrival(
        &mut self,
        after: SimTime,
        topo: &Topology,
        rng: &mut StdRng,
    ) -> SimResult<Option<Arrival>>;
}
