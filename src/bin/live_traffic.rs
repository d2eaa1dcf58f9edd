//! 实时流量仿真
//!
//! 加载场景（或内置链/环拓扑），按固定模式持续发起随机连接请求，
//! 最后打印 QoS 指标，可选输出拓扑快照 JSON。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use ocs_sim::sim::{OcsSimulator, ScenarioSpec, SimConfig, SwitchingMode, TrafficGenerator};
use ocs_sim::topo::chain::{ChainOpts, build_chain};
use ocs_sim::topo::ring::{RingOpts, build_ring};
use tracing::{error, info};

const DEFAULT_REQUESTS: u64 = 100;

#[derive(Debug, Parser)]
#[command(name = "live-traffic", about = "光交换网络实时流量仿真：随机请求 + QoS 统计")]
struct Args {
    /// Path to scenario.json
    #[arg(long, conflicts_with_all = ["chain", "ring"])]
    scenario: Option<PathBuf>,

    /// 使用 n0..n{k-1} 的链状拓扑
    #[arg(long, conflicts_with = "ring")]
    chain: Option<usize>,

    /// 使用 n0..n{k-1} 的环形拓扑
    #[arg(long)]
    ring: Option<usize>,

    /// 每条链路的波长数
    #[arg(long)]
    wavelengths: Option<usize>,

    /// 波长转换器数量（大于 0 即允许转换）
    #[arg(long)]
    converters: Option<u32>,

    #[arg(long)]
    requests: Option<u64>,

    /// OCS, OBS or OPS
    #[arg(long)]
    mode: Option<SwitchingMode>,

    #[arg(long)]
    allow_conversion: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// 两次请求之间的间隔（毫秒）
    #[arg(long)]
    gap_ms: Option<u64>,

    /// 开始前置为故障的节点，可重复
    #[arg(long = "fail")]
    fail: Vec<String>,

    /// Output snapshot JSON file
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化 tracing；日志写 stderr，stdout 只输出结果
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

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "仿真失败");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> ocs_sim::Result<()> {
    let scenario = args.scenario.as_deref().map(ScenarioSpec::load).transpose()?;
    let traffic = scenario
        .as_ref()
        .and_then(|s| s.traffic.clone())
        .unwrap_or_default();

    let mut config = scenario
        .as_ref()
        .map(ScenarioSpec::sim_config)
        .unwrap_or_else(SimConfig::default);
    if let Some(w) = args.wavelengths {
        config.wavelengths = w;
    }
    if let Some(c) = args.converters {
        config.converters = c;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let sim = OcsSimulator::new(config)?;
    match (&scenario, args.chain, args.ring) {
        (Some(spec), _, _) => spec.apply(&sim)?,
        (None, _, Some(len)) => {
            build_ring(&sim, &RingOpts { len, ..RingOpts::default() })?;
        }
        (None, len, None) => {
            let len = len.unwrap_or(ChainOpts::default().len);
            build_chain(&sim, &ChainOpts { len, ..ChainOpts::default() })?;
        }
    }
    for n in &args.fail {
        sim.fail_node(n)?;
    }

    let mode = args.mode.or(traffic.mode).unwrap_or_default();
    let allow_conversion = args.allow_conversion || traffic.allow_conversion.unwrap_or(false);
    let requests = args.requests.or(traffic.requests).unwrap_or(DEFAULT_REQUESTS);
    let gap = Duration::from_millis(args.gap_ms.or(traffic.gap_ms).unwrap_or(0));
    // 流量随机源与引擎随机源分开；--seed 优先于场景里的 traffic.seed
    let traffic_seed = args.seed.map(|s| s.wrapping_add(1)).or(traffic.seed);

    info!(%mode, allow_conversion, requests, "▶️  开始发流量");
    let mut generator = TrafficGenerator::new(traffic_seed, mode, allow_conversion).with_gap(gap);
    let summary = generator.run(&sim, requests);

    let qos = sim.get_qos();
    println!(
        "traffic requests={} successful={} blocked_no_path={} blocked_no_wavelength={}",
        summary.requests,
        summary.successful,
        summary.blocked_no_path,
        summary.blocked_no_wavelength
    );
    println!(
        "qos blocking_probability={} average_delay={} average_throughput={}",
        qos.blocking_probability, qos.average_delay, qos.average_throughput
    );
    for link in sim.links() {
        println!("link {}-{} load={:?} {}", link.a, link.b, link.load, link.label());
    }

    if let Some(path) = args.snapshot_json {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        fs::write(&path, json)?;
        eprintln!("wrote snapshot to {}", path.display());
    }
    Ok(())
}
