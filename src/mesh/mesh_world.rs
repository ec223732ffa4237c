//! 网状网络世界
//!
//! 一轮仿真的全部可变状态：拓扑（路由器/链路）、参数、随机数、流量生成器、
//! 统计与可选的事件追踪。每轮仿真使用独立的实例，互不共享。

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::stats::RunStats;
use super::topology::Topology;
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::sim::{Event, EventKind, SimTime, Simulator, World};
use crate::trace::{TraceEvent, TraceLogger};
use crate::traffic::{PoissonTraffic, TrafficGenerator};
use tracing::{debug, info};

/// 网状网络世界：实现 `World`，按事件类型分派到各处理函数。
#[derive(Debug)]
pub struct MeshWorld {
    pub topo: Topology,
    pub stats: RunStats,
    pub trace: Option<TraceLogger>,
    pub(crate) cfg: SimConfig,
    pub(crate) rng: StdRng,
    traffic: Box<dyn TrafficGenerator>,
    traffic_exhausted: bool,
    progress: u64,
}

impl MeshWorld {
    /// 用给定拓扑和流量生成器创建；拓扑会被复位到初始状态。
    pub fn new(
        mut topo: Topology,
        cfg: SimConfig,
        traffic: Box<dyn TrafficGenerator>,
        seed: u64,
    ) -> Self {
        topo.reset(cfg.fs_enabled);
        Self {
            topo,
            stats: RunStats::default(),
            trace: None,
            cfg,
            rng: StdRng::seed_from_u64(seed),
            traffic,
            traffic_exhausted: false,
            progress: 0,
        }
    }

    /// 使用泊松流量
    pub fn with_poisson_traffic(topo: Topology, cfg: SimConfig, seed: u64) -> SimResult<Self> {
        let traffic = PoissonTraffic::new(&cfg)?;
        Ok(Self::new(topo, cfg, Box::new(traffic), seed))
    }

    pub fn enable_trace(&mut self) {
        self.trace = Some(TraceLogger::default());
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// 调度第一个到达；启用 FS 时在当前时刻调度第一次 SCHEDULE。
    pub fn start(&mut self, sim: &mut Simulator) -> SimResult<()> {
        info!(
            routers = self.topo.routers().len(),
            links = self.topo.links().len(),
            gateways = self.topo.gateways().len(),
            fs_enabled = self.cfg.fs_enabled,
            "开始一轮仿真"
        );
        self.schedule_next_arrival(sim)?;
        if self.cfg.fs_enabled {
            sim.schedule(Event::schedule(sim.now()));
        }
        Ok(())
    }

    /// `start` + 运行到结束，返回本轮统计
    pub fn run(&mut self, sim: &mut Simulator) -> SimResult<&RunStats> {
        self.start(sim)?;
        sim.run(self)?;
        self.stats.final_time = sim.now();
        Ok(&self.stats)
    }

    /// 在边界内向生成器要下一个到达并调度为 NEW 事件
    pub(crate) fn schedule_next_arrival(&mut self, sim: &mut Simulator) -> SimResult<()> {
        if self.traffic_exhausted || self.bounds_reached(sim.now()) {
            return Ok(());
        }
        match self
            .traffic
            .next_arrival(sim.now(), &self.topo, &mut self.rng)?
        {
            Some(a) => sim.schedule(Event::new_packet(a.time, a.source, a.destination)),
            None => {
                debug!("流量生成器已耗尽");
                self.traffic_exhausted = true;
            }
        }
        Ok(())
    }

    fn bounds_reached(&self, now: SimTime) -> bool {
        self.stats.packet_counter >= self.cfg.num_packets || now >= self.cfg.end()
    }
}

impl World for MeshWorld {
    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> SimResult<()> {
        self.stats.events += 1;
        if let Some(t) = &mut self.trace {
            t.push(TraceEvent::from(&ev));
        }
        debug!(event = %ev, "处理事件");

        match ev.kind {
            EventKind::New => self.on_new(&ev, sim),
            EventKind::Hop => self.on_hop(&ev, sim),
            EventKind::Success => self.on_success(&ev),
            EventKind::Drop => self.on_drop(&ev),
            EventKind::Schedule => self.on_schedule(sim),
            EventKind::PermissionStart => self.on_permission(&ev, true),
            EventKind::PermissionStop => self.on_permission(&ev, false),
        }
    }

    fn on_tick(&mut self, sim: &mut Simulator) -> SimResult<()> {
        if !self.cfg.display_progress || self.cfg.num_packets == 0 {
            return Ok(());
        }
        let pct = self.stats.packet_counter * 100 / self.cfg.num_packets;
        if pct != self.progress {
            self.progress = pct;
            info!(
                progress = pct,
                now = %sim.now(),
                packets = self.stats.packet_counter,
                "仿真进度"
            );
        }
        Ok(())
    }

    /// 时间或包数达到上限；或流量已耗尽且网络中没有在途包。
    fn is_done(&self, sim: &Simulator) -> bool {
        self.bounds_reached(sim.now()) || (self.traffic_exhausted && self.stats.in_flight() == 0)
    }
}
