//! 单包追踪模式
//!
//! 在直线拓扑上只发送一个数据包，打印详细的执行流程和调试信息

use std::process::ExitCode;

use clap::Parser;
use meshsim_rs::config::SimConfig;
use meshsim_rs::error::SimResult;
use meshsim_rs::mesh::{MeshWorld, RouterId, Topology};
use meshsim_rs::sim::{EventKind, SimTime, Simulator};
use meshsim_rs::traffic::{Arrival, ScriptedTraffic};
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(
    name = "trace-single-packet",
    about = "单包追踪模式：只发送一个数据包，打印详细的执行流程"
)]
struct Args {
    /// 直线上的路由器数量
    #[arg(long, default_value_t = 3)]
    routers: usize,
    /// 相邻路由器间距
    #[arg(long, default_value_t = 50.0)]
    spacing: f64,
    /// 每跳时延（毫秒）
    #[arg(long, default_value_t = 10)]
    hop_delay_ms: u64,
    /// 启用 FS 调度
    #[arg(long)]
    fs: bool,
    /// 打印事件追踪 JSON
    #[arg(long)]
    dump_trace: bool,
}

fn run(args: &Args) -> SimResult<()> {
    let topo = Topology::chain(args.routers, args.spacing)?;
    let dst = topo.gateways().first().copied().unwrap_or(RouterId(0));
    info!(
        routers = topo.routers().len(),
        links = topo.links().len(),
        "构建直线拓扑: r0 (src) -> ... -> 网关 (dst)"
    );
    for r in topo.routers() {
        debug!(router = %r, "路由器");
    }

    let cfg = SimConfig {
        fs_enabled: args.fs,
        hop_delay_secs: args.hop_delay_ms as f64 / 1000.0,
        repeats: 1,
        display_progress: false,
        ..SimConfig::default()
    };
    cfg.validate()?;

    let traffic = ScriptedTraffic::new([Arrival {
        time: SimTime::ZERO,
        source: RouterId(0),
        destination: dst,
    }]);

    info!("╔════════════════════════════════════════════════════════════════════════════════╗");
    info!("║                    单包追踪模式启动                                            ║");
    info!("╚════════════════════════════════════════════════════════════════════════════════╝");

    let mut sim = Simulator::default();
    let mut world = MeshWorld::new(topo, cfg, Box::new(traffic), 1);
    world.enable_trace();
    world.run(&mut sim)?;

    info!("╔════════════════════════════════════════════════════════════════════════════════╗");
    info!("║                    仿真完成                                                    ║");
    info!("╚════════════════════════════════════════════════════════════════════════════════╝");

    if let Some(trace) = &world.trace {
        info!(
            hops = trace.count(EventKind::Hop),
            success = trace.count(EventKind::Success),
            dropped = trace.count(EventKind::Drop),
            "事件统计"
        );
        if args.dump_trace {
            match trace.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => error!(error = %e, "序列化追踪失败"),
            }
        }
    }

    println!(
        "done @ {}, success={}, dropped={}, delay={:.6}s",
        sim.now(),
        world.stats.success_counter,
        world.stats.drop_counter,
        world.stats.avg_delivered_delay()
    );
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "仿真失败");
            ExitCode::FAILURE
        }
    }
}
