//! 多轮仿真驱动
//!
//! 构建一次拓扑，然后重复运行 `repeats` 轮相互独立的仿真（每轮使用拓扑的
//! 独立副本、独立事件队列与统计），最后对各轮指标取平均。

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::mesh::{MeshWorld, RunStats, Topology};
use crate::sim::Simulator;
use crate::topo;
use crate::trace::TraceLogger;
use tracing::info;

/// 单轮结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run: u32,
    pub seed: u64,
    pub stats: RunStats,
    pub delivery_ratio: f64,
    pub avg_delay: f64,
}

/// 多轮汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub fs_enabled: bool,
    pub base_seed: u64,
    pub routers: usize,
    pub gateways: usize,
    pub links: usize,
    pub runs: Vec<RunSummary>,
    /// 各轮时延估计的平均（秒）
    pub avg_delay: f64,
    /// 各轮投递率的平均（百分比）
    pub avg_delivery_ratio: f64,
}

/// `run_batch` 的结果；`trace` 为第一轮的事件追踪（如果要求记录）
#[derive(Debug)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub trace: Option<TraceLogger>,
}

/// 在给定拓扑的独立副本上运行一轮
pub fn run_once(topo: &Topology, cfg: &SimConfig, seed: u64, trace: bool) -> SimResult<MeshWorld> {
    let mut world = MeshWorld::with_poisson_traffic(topo.clone(), cfg.clone(), seed)?;
    if trace {
        world.enable_trace();
    }
    let mut sim = Simulator::default();
    world.run(&mut sim)?;
    Ok(world)
}

/// 按配置构建拓扑并运行全部轮次；任一轮出错即中止整个批次。
pub fn run_batch(cfg: &SimConfig, trace_first_run: bool) -> SimResult<BatchOutcome> {
    cfg.validate()?;
    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let mut topo_rng = StdRng::seed_from_u64(base_seed);
    let topo = topo::build(&cfg.topology, &mut topo_rng)?;

    let mut runs = Vec::with_capacity(cfg.repeats as usize);
    let mut trace = None;
    for run in 0..cfg.repeats {
        let seed = base_seed.wrapping_add(u64::from(run));
        let mut world = run_once(&topo, cfg, seed, trace_first_run && run == 0)?;
        if run == 0 {
            trace = world.trace.take();
        }

        let stats = world.stats;
        info!(
            run = run + 1,
            of = cfg.repeats,
            pkts = stats.packet_counter,
            success = stats.success_counter,
            dropped = stats.drop_counter,
            pdr = stats.delivery_ratio(),
            "本轮完成"
        );
        runs.push(RunSummary {
            run,
            seed,
            delivery_ratio: stats.delivery_ratio(),
            avg_delay: stats.avg_delay_estimate(),
            stats,
        });
    }

    let n = runs.len().max(1) as f64;
    let summary = BatchSummary {
        fs_enabled: cfg.fs_enabled,
        base_seed,
        routers: topo.routers().len(),
        gateways: topo.gateways().len(),
        links: topo.links().len(),
        avg_delay: runs.iter().map(|r| r.avg_delay).sum::<f64>() / n,
        avg_delivery_ratio: runs.iter().map(|r| r.delivery_ratio).sum::<f64>() / n,
        runs,
    };
    info!(
        runs = summary.runs.len(),
        avg_delay = summary.avg_delay,
        avg_pdr = summary.avg_delivery_ratio,
        "全部轮次完成"
    );
    Ok(BatchOutcome { summary, trace })
}
