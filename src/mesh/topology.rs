//! 网状网络拓扑
//!
//! 持有路由器、有向链路、(source, destination) -> LinkId 索引与网关列表。
//! 拓扑由 `topo` 模块构建，仿真过程中只修改路由器状态与链路需求计数。

use std::collections::HashMap;

use super::id::{LinkId, RouterId};
use super::link::Link;
use super::router::{Point, Router};
use super::routing::GreedyRouting;
use crate::error::{ConfigError, InvariantError, SimResult};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Topology {
    routers: Vec<Router>,
    links: Vec<Link>,
    edges: HashMap<(RouterId, RouterId), LinkId>,
    gateways: Vec<RouterId>,
    routing: GreedyRouting,
}

impl Topology {
    /// 添加路由器
    pub fn add_router(&mut self, pos: Point) -> RouterId {
        let id = RouterId(self.routers.len());
        self.routers.push(Router::new(id, pos));
        self.routing.clear();
        id
    }

    /// 记录 `b` 为 `a` 的邻居（单向）
    pub fn add_neighbour(&mut self, a: RouterId, b: RouterId) -> SimResult<()> {
        if a == b {
            return Ok(());
        }
        self.router(b)?;
        self.router_mut(a)?.add_neighbour(b);
        self.routing.clear();
        Ok(())
    }

    /// 双向邻居
    pub fn connect(&mut self, a: RouterId, b: RouterId) -> SimResult<()> {
        self.add_neighbour(a, b)?;
        self.add_neighbour(b, a)
    }

    /// 添加有向链路；同一 (source, destination) 只会存在一条。
    pub fn add_link(&mut self, source: RouterId, destination: RouterId) -> SimResult<LinkId> {
        self.router(source)?;
        self.router(destination)?;
        if let Some(&id) = self.edges.get(&(source, destination)) {
            return Ok(id);
        }
        let id = LinkId(self.links.len());
        self.links.push(Link::new(id, source, destination));
        self.edges.insert((source, destination), id);
        Ok(id)
    }

    /// 按路由器 id 顺序、邻居顺序为每个邻接关系生成一条有向链路。
    pub fn generate_links(&mut self) -> SimResult<usize> {
        let pairs = self
            .routers
            .iter()
            .flat_map(|r| r.neighbours.iter().map(move |&n| (r.id, n)))
            .collect::<Vec<_>>();
        for (s, d) in pairs {
            self.add_link(s, d)?;
        }
        debug!(links = self.links.len(), "生成链路");
        Ok(self.links.len())
    }

    pub fn set_gateway(&mut self, id: RouterId) -> SimResult<()> {
        let r = self.router_mut(id)?;
        if !r.gateway {
            r.gateway = true;
            self.gateways.push(id);
        }
        Ok(())
    }

    pub fn router(&self, id: RouterId) -> SimResult<&Router> {
        Ok(self
            .routers
            .get(id.0)
            .ok_or(ConfigError::UnknownRouter(id))?)
    }

    pub fn router_mut(&mut self, id: RouterId) -> SimResult<&mut Router> {
        Ok(self
            .routers
            .get_mut(id.0)
            .ok_or(ConfigError::UnknownRouter(id))?)
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn gateways(&self) -> &[RouterId] {
        &self.gateways
    }

    /// 查找 source -> destination 的链路
    pub fn find_link(&self, source: RouterId, destination: RouterId) -> SimResult<LinkId> {
        Ok(self
            .edges
            .get(&(source, destination))
            .copied()
            .ok_or(InvariantError::UnknownLink {
                from: source,
                to: destination,
            })?)
    }

    pub fn distance(&self, a: RouterId, b: RouterId) -> SimResult<f64> {
        Ok(self.router(a)?.pos.distance(&self.router(b)?.pos))
    }

    /// 距离某点最近的路由器；给定 `max_range` 时只考虑该范围内的路由器。
    pub fn nearest_router(&self, p: Point, max_range: Option<f64>) -> Option<RouterId> {
        let mut best: Option<(f64, RouterId)> = None;
        for r in &self.routers {
            let d = r.pos.distance(&p);
            if max_range.is_some_and(|range| d > range) {
                continue;
            }
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, r.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// 距离某路由器最近的网关
    pub fn nearest_gateway(&self, id: RouterId) -> SimResult<RouterId> {
        let pos = self.router(id)?.pos;
        let mut best: Option<(f64, RouterId)> = None;
        for &gw in &self.gateways {
            let d = self.router(gw)?.pos.distance(&pos);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, gw));
            }
        }
        Ok(best.map(|(_, gw)| gw).ok_or(ConfigError::NoGateway)?)
    }

    /// 贪心转发的下一跳
    pub fn next_hop(&mut self, from: RouterId, dst: RouterId) -> SimResult<RouterId> {
        self.routing.next_hop(&self.routers, from, dst)
    }

    /// `from` 到 `dst` 的预测路径所经过的链路
    pub fn projected_path(&mut self, from: RouterId, dst: RouterId) -> SimResult<Vec<LinkId>> {
        let hops = self.routing.path(&self.routers, from, dst)?;
        let path = hops
            .into_iter()
            .map(|(u, v)| self.find_link(u, v))
            .collect::<SimResult<Vec<_>>>()?;
        trace!(from = ?from, dst = ?dst, path = ?path, "预测路径");
        Ok(path)
    }

    /// 链路需求 +1
    pub fn add_requirement(&mut self, link: LinkId) -> SimResult<()> {
        let l = self
            .links
            .get_mut(link.0)
            .ok_or(InvariantError::UnknownLinkId(link))?;
        l.requirement += 1;
        Ok(())
    }

    /// 链路需求 -1；减到负数说明预测与释放不匹配
    pub fn remove_requirement(&mut self, link: LinkId) -> SimResult<()> {
        let l = self
            .links
            .get_mut(link.0)
            .ok_or(InvariantError::UnknownLinkId(link))?;
        l.requirement = l
            .requirement
            .checked_sub(1)
            .ok_or(InvariantError::RequirementUnderflow { link })?;
        Ok(())
    }

    /// 当前需求快照（按链路 id 下标）
    pub fn demand(&self) -> Vec<u32> {
        self.links.iter().map(|l| l.requirement).collect()
    }

    /// 复位到一轮仿真的初始状态
    pub fn reset(&mut self, fs_enabled: bool) {
        for r in &mut self.routers {
            r.reset(fs_enabled);
        }
        for l in &mut self.links {
            l.requirement = 0;
        }
    }

    /// 直线拓扑：n 个路由器等间距排在 x 轴上，相邻者互为邻居，
    /// 最后一个为网关，并为每个邻接关系生成链路。
    pub fn chain(n: usize, spacing: f64) -> SimResult<Topology> {
        let mut topo = Topology::default();
        let ids = (0..n)
            .map(|i| topo.add_router(Point::new(i as f64 * spacing, 0.0)))
            .collect::<Vec<_>>();
        for w in ids.windows(2) {
            topo.connect(w[0], w[1])?;
        }
        if let Some(&last) = ids.last() {
            topo.set_gateway(last)?;
        }
        topo.generate_links()?;
        Ok(topo)
    }
}
