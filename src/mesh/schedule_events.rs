//! FS 调度事件
//!
//! SCHEDULE 根据当前链路需求生成团覆盖，并把它展开成首尾相接的时隙：
//! 每个团占用 `weight × HOPDELAY`，时隙开始/结束时为团内每条链路的两端
//! 调度 PERMISSION_START/STOP。最后一个时隙结束后再过一个 HOPDELAY 重新调度。

use super::mesh_world::MeshWorld;
use crate::error::{InvariantError, SimResult};
use crate::sched::Scheduler;
use crate::sim::{Event, Simulator};
use tracing::{debug, trace};

impl MeshWorld {
    #[tracing::instrument(skip(self, sim), fields(now = ?sim.now()))]
    pub(crate) fn on_schedule(&mut self, sim: &mut Simulator) -> SimResult<()> {
        let scheduler = Scheduler::new(&self.topo, self.cfg.interference)?;
        let demand = scheduler.demand().to_vec();
        let rounds = scheduler.generate_schedule();
        let hop_delay = self.cfg.hop_delay();

        let mut start = sim.now();
        for clique in &rounds {
            let weight = clique.weight(&demand);
            let stop = start.saturating_add(hop_delay.times(u64::from(weight)));
            for &id in clique.links() {
                let link = self
                    .topo
                    .link(id)
                    .ok_or(InvariantError::UnknownLinkId(id))?;
                trace!(link = %link, start = %start, stop = %stop, "分配时隙");
                sim.schedule(Event::permission_start(start, link.source, link.destination));
                sim.schedule(Event::permission_stop(stop, link.source, link.destination));
            }
            start = stop;
        }

        sim.schedule(Event::schedule(start.saturating_add(hop_delay)));
        self.stats.schedules += 1;
        debug!(
            rounds = rounds.len(),
            next_schedule = %start.saturating_add(hop_delay),
            "生成调度"
        );
        Ok(())
    }

    /// 设置链路两端路由器的发送许可
    pub(crate) fn on_permission(&mut self, ev: &Event, granted: bool) -> SimResult<()> {
        let (a, b) = ev.endpoints()?;
        self.topo.router_mut(a)?.permission = granted;
        self.topo.router_mut(b)?.permission = granted;
        trace!(a = ?a, b = ?b, granted, "更新发送许可");
        Ok(())
    }
}
