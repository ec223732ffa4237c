//! 方形网格拓扑构建

use super::connect_within_range;
use crate::config::TopologyConfig;
use crate::error::{ConfigError, SimResult};
use crate::mesh::{Point, RouterId, Topology};

#[derive(Debug, Clone)]
pub struct GridOpts {
    pub max_x: f64,
    pub max_y: f64,
    pub router_range: f64,
    pub num_routers: usize,
    pub num_gateways: usize,
}

impl Default for GridOpts {
    fn default() -> Self {
        (&TopologyConfig::default()).into()
    }
}

impl From<&TopologyConfig> for GridOpts {
    fn from(cfg: &TopologyConfig) -> Self {
        Self {
            max_x: cfg.max_x,
            max_y: cfg.max_y,
            router_range: cfg.router_range,
            num_routers: cfg.num_routers,
            num_gateways: cfg.num_gateways,
        }
    }
}

/// 构建方形网格拓扑
///
/// 每行 `round(sqrt(n))` 个路由器，间距为区域边长除以每行个数（不超过通信距离）。
/// 第一个网关取中间的路由器，之后每次选“离最近网关最远”的路由器。
pub fn build_grid(opts: &GridOpts) -> SimResult<Topology> {
    let mut topo = Topology::default();
    let per_row = ((opts.num_routers as f64).sqrt().round() as usize).max(1);
    let x_sep = (opts.max_x / per_row as f64).min(opts.router_range);
    let y_sep = (opts.max_y / per_row as f64).min(opts.router_range);

    let (mut x, mut y, mut in_row) = (0.0, 0.0, 0usize);
    for _ in 0..opts.num_routers {
        topo.add_router(Point::new(x, y));
        in_row += 1;
        if x + x_sep >= opts.max_x || in_row >= per_row {
            x = 0.0;
            y += y_sep;
            in_row = 0;
        } else {
            x += x_sep;
        }
    }

    connect_within_range(&mut topo, opts.router_range, true)?;
    place_spread_gateways(&mut topo, opts.num_gateways)?;
    topo.generate_links()?;
    Ok(topo)
}

/// 中间路由器作为首个网关，其余网关依次最大化到已有网关的最小距离
fn place_spread_gateways(topo: &mut Topology, count: usize) -> SimResult<()> {
    let n = topo.routers().len();
    let too_many = ConfigError::TooManyGateways {
        requested: count,
        routers: n,
    };
    if count > n || n == 0 {
        return Err(too_many.into());
    }

    topo.set_gateway(RouterId((n - 1) / 2))?;
    while topo.gateways().len() < count {
        let mut best: Option<(f64, RouterId)> = None;
        for r in topo.routers() {
            let gw = topo.nearest_gateway(r.id)?;
            let d = topo.distance(r.id, gw)?;
            if d > best.map_or(0.0, |(bd, _)| bd) {
                best = Some((d, r.id));
            }
        }
        let (_, next) = best.ok_or_else(|| too_many.clone())?;
        topo.set_gateway(next)?;
    }
    Ok(())
}
