//! 泊松到达流量
//!
//! 到达间隔服从均值为 `mean` 的指数分布。每个包以 `updown_ratio` 的概率为上行
//! （接入路由器 -> 最近网关），否则为下行（最近网关 -> 接入路由器）。

use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};

use super::{Arrival, TrafficGenerator};
use crate::config::{OriginModel, SimConfig};
use crate::error::{ConfigError, SimResult};
use crate::mesh::{Point, RouterId, Topology};
use crate::sim::SimTime;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct PoissonTraffic {
    inter_arrival: Exp<f64>,
    updown_ratio: f64,
    origin: OriginModel,
    max_x: f64,
    max_y: f64,
    client_range: f64,
}

impl PoissonTraffic {
    pub fn new(cfg: &SimConfig) -> SimResult<Self> {
        let inter_arrival = Exp::new(1.0 / cfg.mean_secs).map_err(|e| {
            ConfigError::InvalidParameter {
                name: "mean_secs",
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            inter_arrival,
            updown_ratio: cfg.updown_ratio,
            origin: cfg.origin,
            max_x: cfg.topology.max_x,
            max_y: cfg.topology.max_y,
            client_range: cfg.topology.client_range,
        })
    }

    /// 为新包选出接入路由器
    fn serving_router(&self, topo: &Topology, rng: &mut StdRng) -> SimResult<RouterId> {
        let n = topo.routers().len();
        if n == 0 {
            return Err(ConfigError::EmptyTopology.into());
        }
        match self.origin {
            OriginModel::UniformRouter => Ok(RouterId(rng.gen_range(0..n))),
            OriginModel::RandomPoint => {
                let p = Point::new(
                    rng.gen_range(0.0..self.max_x),
                    rng.gen_range(0.0..self.max_y),
                );
                Ok(topo
                    .nearest_router(p, Some(self.client_range))
                    .ok_or(ConfigError::CoverageGap { x: p.x, y: p.y })?)
            }
        }
    }
}

impl TrafficGenerator for PoissonTraffic {
    fn next_arrival(
        &mut self,
        after: SimTime,
        topo: &Topology,
        rng: &mut StdRng,
    ) -> SimResult<Option<Arrival>> {
        let uplink = rng.gen_range(0.0..1.0) < self.updown_ratio;
        let serving = self.serving_router(topo, rng)?;
        let gateway = topo.nearest_gateway(serving)?;
        let (source, destination) = if uplink {
            (serving, gateway)
        } else {
            (gateway, serving)
        };

        let gap = SimTime::from_secs_f64(self.inter_arrival.sample(rng));
        let time = after.saturating_add(gap);
        trace!(time = ?time, source = ?source, destination = ?destination, uplink, "生成到达");
        Ok(Some(Arrival {
            time,
            source,
            destination,
        }))
    }
}
