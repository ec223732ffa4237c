//! 拓扑构建
//!
//! 在平面上摆放路由器、按通信距离生成邻接关系与有向链路，并选出网关。

pub mod grid;
pub mod hexagonal;

use rand::rngs::StdRng;

use crate::config::{TopologyConfig, TopologyKind};
use crate::error::SimResult;
use crate::mesh::{RouterId, Topology};
use tracing::info;

/// 按配置构建拓扑
pub fn build(cfg: &TopologyConfig, rng: &mut StdRng) -> SimResult<Topology> {
    let topo = match cfg.kind {
        TopologyKind::Hexagonal => hexagonal::build_hexagonal(&cfg.into(), rng)?,
        TopologyKind::Grid => grid::build_grid(&cfg.into())?,
    };
    info!(
        kind = ?cfg.kind,
        routers = topo.routers().len(),
        gateways = topo.gateways().len(),
        links = topo.links().len(),
        "拓扑构建完成"
    );
    Ok(topo)
}

/// 为距离在 `range` 内的每对路由器建立双向邻接。
///
/// `inclusive` 为 true 时距离恰好等于 `range` 也算邻居。
pub fn connect_within_range(topo: &mut Topology, range: f64, inclusive: bool) -> SimResult<()> {
    let n = topo.routers().len();
    for a in 0..n {
        for b in 0..n {
            if a == b {
                continue;
            }
            let d = topo.distance(RouterId(a), RouterId(b))?;
            if d < range || (inclusive && d == range) {
                topo.add_neighbour(RouterId(a), RouterId(b))?;
            }
        }
    }
    Ok(())
}
