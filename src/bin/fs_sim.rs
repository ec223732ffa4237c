//! 网状网络 FS 调度仿真
//!
//! 构建一次拓扑，重复运行若干轮并打印平均时延与投递率。

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use meshsim_rs::batch::{BatchSummary, run_batch};
use meshsim_rs::config::{SimConfig, TopologyKind};
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "fs-sim",
    about = "Wireless mesh simulator with clique-based link scheduling"
)]
struct Args {
    /// JSON 配置文件；缺省字段取默认值
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override number of independent runs
    #[arg(long)]
    repeats: Option<u32>,

    /// Base seed; run i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Override packet budget per run
    #[arg(long)]
    num_packets: Option<u64>,

    /// Override simulated time limit (seconds)
    #[arg(long)]
    end_secs: Option<f64>,

    /// Override mean inter-arrival time (seconds)
    #[arg(long)]
    mean_secs: Option<f64>,

    /// Override topology: hexagonal or grid
    #[arg(long)]
    topology: Option<String>,

    /// Override number of gateways
    #[arg(long)]
    gateways: Option<usize>,

    /// Disable FS scheduling (every router always has permission)
    #[arg(long)]
    no_fs: bool,

    /// Disable progress logging
    #[arg(long)]
    quiet: bool,

    /// Write the first run's event trace as JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// Print the batch summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<SimConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    if let Some(v) = args.repeats {
        cfg.repeats = v;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(v) = args.num_packets {
        cfg.num_packets = v;
    }
    if let Some(v) = args.end_secs {
        cfg.end_secs = v;
    }
    if let Some(v) = args.mean_secs {
        cfg.mean_secs = v;
    }
    if let Some(kind) = args.topology.as_deref() {
        cfg.topology.kind = match kind {
            "hexagonal" => TopologyKind::Hexagonal,
            "grid" => TopologyKind::Grid,
            other => return Err(format!("unknown topology: {other}").into()),
        };
    }
    if let Some(v) = args.gateways {
        cfg.topology.num_gateways = v;
    }
    if args.no_fs {
        cfg.fs_enabled = false;
    }
    if args.quiet {
        cfg.display_progress = false;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn print_summary(s: &BatchSummary) {
    println!(
        "topology: routers={} gateways={} links={} fs_enabled={} seed={}",
        s.routers, s.gateways, s.links, s.fs_enabled, s.base_seed
    );
    for r in &s.runs {
        println!(
            "run {}: pkts={} success={} dropped={} blocked={} pdr={:.2}% delay={:.6}s schedules={} done@{}",
            r.run + 1,
            r.stats.packet_counter,
            r.stats.success_counter,
            r.stats.drop_counter,
            r.stats.blocked_counter,
            r.delivery_ratio,
            r.avg_delay,
            r.stats.schedules,
            r.stats.final_time,
        );
    }
    println!("Avg. Delay: {:.6}s", s.avg_delay);
    println!("Avg. PDR: {:.2}%", s.avg_delivery_ratio);
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(&args)?;
    let outcome = run_batch(&cfg, args.trace_json.is_some())?;

    if let (Some(path), Some(trace)) = (&args.trace_json, &outcome.trace) {
        fs::write(path, trace.to_json()?)?;
        eprintln!("wrote trace events to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        print_summary(&outcome.summary);
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing（日志写到 stderr，stdout 只留结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "仿真失败");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
