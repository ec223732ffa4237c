//! 数据包生命周期事件
//!
//! NEW -> 缓冲区(源) -> {HOP -> 缓冲区(下一跳)}* -> SUCCESS | DROP

use rand::Rng;

use super::id::RouterId;
use super::mesh_world::MeshWorld;
use crate::error::{InvariantError, SimResult};
use crate::sim::{Event, SimTime, Simulator};
use tracing::{debug, trace};

impl MeshWorld {
    /// 新包到达源路由器。
    ///
    /// 源路由器忙或缓冲区非空时直接拒收：不产生 DROP，也不计入 packet_counter。
    #[tracing::instrument(skip(self, ev, sim), fields(now = ?ev.time, src = ?ev.source, dst = ?ev.destination))]
    pub(crate) fn on_new(&mut self, ev: &Event, sim: &mut Simulator) -> SimResult<()> {
        let (src, dst) = ev.endpoints()?;
        let now = sim.now();

        // 路径不收敛属于拓扑错误，无论是否启用 FS 都在入网时暴露
        let path = self.topo.projected_path(src, dst)?;

        if self.topo.router(src)?.is_free() {
            self.stats.packet_counter += 1;
            if self.cfg.fs_enabled {
                for &l in &path {
                    self.topo.add_requirement(l)?;
                }
            }
            self.topo.router_mut(src)?.occupy(dst);

            let hop_delay = self.cfg.hop_delay();
            sim.schedule(Event::hop(now.saturating_add(hop_delay), src, dst, hop_delay));
            trace!(hops = path.len(), "新包进入源路由器");
        } else {
            self.stats.blocked_counter += 1;
            debug!("源路由器忙，新包被拒收");
        }

        self.schedule_next_arrival(sim)
    }

    /// 尝试把包从 `source` 转发到朝目的地最近的邻居。
    #[tracing::instrument(skip(self, ev, sim), fields(now = ?ev.time, at = ?ev.source, dst = ?ev.destination))]
    pub(crate) fn on_hop(&mut self, ev: &Event, sim: &mut Simulator) -> SimResult<()> {
        let (src, dst) = ev.endpoints()?;
        let now = sim.now();
        let delay = ev.delay;

        if src == dst {
            sim.schedule(Event::success(now, src, dst, delay));
            return Ok(());
        }

        let next = self.topo.next_hop(src, dst)?;
        let (can_hop, retries) = {
            let here = self.topo.router(src)?;
            if here.busy && here.buffer.is_none() {
                return Err(InvariantError::BusyWithoutPacket { router: src }.into());
            }
            let there = self.topo.router(next)?;
            (
                there.is_free() && here.permission && there.permission,
                here.retries,
            )
        };

        if can_hop {
            self.commit_hop(src, next, dst)?;
            if next == dst {
                sim.schedule(Event::success(now, next, dst, delay));
            } else {
                let hop_delay = self.cfg.hop_delay();
                sim.schedule(Event::hop(
                    now.saturating_add(hop_delay),
                    next,
                    dst,
                    delay.saturating_add(hop_delay),
                ));
            }
            trace!(next = ?next, "转发成功");
        } else if retries < self.cfg.max_retries {
            let backoff = self.retry_backoff();
            self.topo.router_mut(src)?.retries += 1;
            sim.schedule(Event::hop(
                now.saturating_add(backoff),
                src,
                dst,
                delay.saturating_add(backoff),
            ));
            debug!(next = ?next, retries = retries + 1, backoff = ?backoff, "下一跳不可用，退避重试");
        } else {
            sim.schedule(Event::drop(now, src, dst, delay));
            debug!(next = ?next, retries, "重试次数用尽，丢包");
        }
        Ok(())
    }

    /// 包移动到下一跳并释放所经链路的一份需求
    fn commit_hop(&mut self, from: RouterId, to: RouterId, dst: RouterId) -> SimResult<()> {
        self.topo.router_mut(from)?.release();
        self.topo.router_mut(to)?.occupy(dst);
        if self.cfg.fs_enabled {
            let l = self.topo.find_link(from, to)?;
            self.topo.remove_requirement(l)?;
        }
        Ok(())
    }

    /// [0, max_retry_time) 内均匀分布的退避时间
    fn retry_backoff(&mut self) -> SimTime {
        let max = self.cfg.max_retry_time().0;
        if max == 0 {
            return SimTime::ZERO;
        }
        SimTime(self.rng.gen_range(0..max))
    }

    /// 包到达目的地
    pub(crate) fn on_success(&mut self, ev: &Event) -> SimResult<()> {
        let (at, _) = ev.endpoints()?;
        self.topo.router_mut(at)?.release();
        self.stats.success_counter += 1;
        self.stats.delivered_delay = self.stats.delivered_delay.saturating_add(ev.delay);
        debug!(at = ?at, delay = %ev.delay, "✅ 数据包送达");
        Ok(())
    }

    /// 丢包：撤销剩余预测路径上的需求并清空缓冲区
    pub(crate) fn on_drop(&mut self, ev: &Event) -> SimResult<()> {
        let (at, dst) = ev.endpoints()?;
        if self.cfg.fs_enabled {
            for l in self.topo.projected_path(at, dst)? {
                self.topo.remove_requirement(l)?;
            }
        }
        self.topo.router_mut(at)?.release();
        self.stats.drop_counter += 1;
        self.stats.dropped_delay = self.stats.dropped_delay.saturating_add(ev.delay);
        debug!(at = ?at, delay = %ev.delay, "❌ 数据包被丢弃");
        Ok(())
    }
}
