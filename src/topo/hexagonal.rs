//! 六边形格点拓扑构建

use rand::Rng;
use rand::rngs::StdRng;

use super::connect_within_range;
use crate::config::TopologyConfig;
use crate::error::{ConfigError, SimResult};
use crate::mesh::{Point, RouterId, Topology};

/// 六边形拓扑配置选项
#[derive(Debug, Clone)]
pub struct HexagonalOpts {
    pub max_x: f64,
    pub max_y: f64,
    pub router_range: f64,
    pub num_gateways: usize,
}

impl Default for HexagonalOpts {
    fn default() -> Self {
        (&TopologyConfig::default()).into()
    }
}

impl From<&TopologyConfig> for HexagonalOpts {
    fn from(cfg: &TopologyConfig) -> Self {
        Self {
            max_x: cfg.max_x,
            max_y: cfg.max_y,
            router_range: cfg.router_range,
            num_gateways: cfg.num_gateways,
        }
    }
}

/// 构建六边形拓扑
///
/// 行距与列距均为 `3/4 · router_range`，奇偶行错开半个列距；
/// 行列都会略微超出区域边界一格，保证边缘被覆盖。
/// 网关从全部路由器中随机选取、互不重复。
pub fn build_hexagonal(opts: &HexagonalOpts, rng: &mut StdRng) -> SimResult<Topology> {
    let mut topo = Topology::default();
    let spacing = 0.75 * opts.router_range;

    let mut y = 0.0;
    let mut indent = true;
    while y < opts.max_y + spacing {
        let mut x = if indent { 0.0 } else { spacing / 2.0 };
        indent = !indent;
        while x < opts.max_x + spacing {
            topo.add_router(Point::new(x, y));
            x += spacing;
        }
        y += spacing;
    }

    connect_within_range(&mut topo, opts.router_range, false)?;

    let n = topo.routers().len();
    if opts.num_gateways > n {
        return Err(ConfigError::TooManyGateways {
            requested: opts.num_gateways,
            routers: n,
        }
        .into());
    }
    while topo.gateways().len() < opts.num_gateways {
        let gw = RouterId(rng.gen_range(0..n));
        topo.set_gateway(gw)?;
    }

    topo.generate_links()?;
    Ok(topo)
}
