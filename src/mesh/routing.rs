//! 贪心地理路由
//!
//! 每一跳选择“离最终目的地最近”的邻居。拓扑在一轮仿真内是静态的，
//! 所以 (from, dst) -> next 的结果可以缓存，避免每次 HOP 都重新扫描邻居。

use std::collections::HashMap;

use super::id::RouterId;
use super::router::Router;
use crate::error::{ConfigError, SimResult};

#[derive(Debug, Default, Clone)]
pub struct GreedyRouting {
    /// (from, dst) -> 下一跳
    next_hops: HashMap<(RouterId, RouterId), RouterId>,
}

impl GreedyRouting {
    /// 拓扑（位置/邻居）变化后必须清空缓存。
    pub fn clear(&mut self) {
        self.next_hops.clear();
    }

    /// 计算 `from` 去往 `dst` 的下一跳；距离相同时取邻居列表中靠前者。
    pub fn next_hop(
        &mut self,
        routers: &[Router],
        from: RouterId,
        dst: RouterId,
    ) -> SimResult<RouterId> {
        if let Some(&nh) = self.next_hops.get(&(from, dst)) {
            return Ok(nh);
        }

        let here = routers.get(from.0).ok_or(ConfigError::UnknownRouter(from))?;
        let target = routers.get(dst.0).ok_or(ConfigError::UnknownRouter(dst))?.pos;

        let mut best: Option<(f64, RouterId)> = None;
        for &n in &here.neighbours {
            let pos = routers.get(n.0).ok_or(ConfigError::UnknownRouter(n))?.pos;
            let d = pos.distance(&target);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, n));
            }
        }

        let (_, nh) = best.ok_or(ConfigError::NoNeighbour { router: from })?;
        self.next_hops.insert((from, dst), nh);
        Ok(nh)
    }

    /// 从 `from` 到 `dst` 的完整贪心路径（逐跳的 (u, v) 对）。
    ///
    /// 路径长度不超过路由器数，否则说明贪心转发陷入循环。
    pub fn path(
        &mut self,
        routers: &[Router],
        from: RouterId,
        dst: RouterId,
    ) -> SimResult<Vec<(RouterId, RouterId)>> {
        let mut hops = Vec::new();
        let mut cur = from;
        while cur != dst {
            if hops.len() >= routers.len() {
                return Err(ConfigError::RoutingLoop {
                    from,
                    to: dst,
                    hops: hops.len(),
                }
                .into());
            }
            let nh = self.next_hop(routers, cur, dst)?;
            hops.push((cur, nh));
            cur = nh;
        }
        Ok(hops)
    }
}
