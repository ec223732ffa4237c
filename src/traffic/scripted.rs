//! 预设流量：按给定列表依次回放

use std::collections::VecDeque;

use rand::rngs::StdRng;

use super::{Arrival, TrafficGenerator};
use crate::error::SimResult;
use crate::mesh::Topology;
use crate::sim::SimTime;

#[derive(Debug, Clone, Default)]
pub struct ScriptedTraffic {
    arrivals: VecDeque<Arrival>,
}

impl ScriptedTraffic {
    pub fn new(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        Self {
            arrivals: arrivals.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.arrivals.len()
    }
}

impl TrafficGenerator for ScriptedTraffic {
    fn next_arrival(
        &mut self,
        after: SimTime,
        _topo: &Topology,
        _rng: &mut StdRng,
    ) -> SimResult<Option<Arrival>> {
        // 早于 `after` 的条目推迟到 `after`，保证时间单调
        Ok(self.arrivals.pop_front().map(|a| Arrival {
            time: a.time.max(after),
            ..a
        }))
    }
}
