//! 实时流量驱动
//!
//! 引擎之外的调度循环：每一步随机挑两个不同节点发起一次连接请求。
//! 挑选范围包括故障节点，这类请求会以 no-path 阻塞。

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use super::connection::{BlockReason, ConnectionResult};
use super::mode::SwitchingMode;
use super::simulator::OcsSimulator;

/// 一轮流量的结果汇总
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficSummary {
    pub requests: u64,
    pub successful: u64,
    pub blocked_no_path: u64,
    pub blocked_no_wavelength: u64,
}

impl TrafficSummary {
    fn record(&mut self, result: &ConnectionResult) {
        self.requests += 1;
        match result.block_reason() {
            None => self.successful += 1,
            Some(BlockReason::NoPath) => self.blocked_no_path += 1,
            Some(BlockReason::NoWavelength) => self.blocked_no_wavelength += 1,
        }
    }
}

/// 随机流量发生器，持有独立于引擎的随机源
pub struct TrafficGenerator<G = StdRng> {
    rng: G,
    mode: SwitchingMode,
    allow_conversion: bool,
    gap: Duration,
}

impl TrafficGenerator<StdRng> {
    pub fn new(seed: Option<u64>, mode: SwitchingMode, allow_conversion: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, mode, allow_conversion)
    }
}

impl<G: Rng> TrafficGenerator<G> {
    pub fn with_rng(rng: G, mode: SwitchingMode, allow_conversion: bool) -> Self {
        Self {
            rng,
            mode,
            allow_conversion,
            gap: Duration::ZERO,
        }
    }

    /// 两次请求之间的等待时间
    pub fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }

    /// 从 `names` 中均匀挑选两个不同节点；不足两个时返回 None
    pub fn pick_pair(&mut self, names: &[String]) -> Option<(String, String)> {
        if names.len() < 2 {
            return None;
        }
        let picked = index::sample(&mut self.rng, names.len(), 2);
        Some((names[picked.index(0)].clone(), names[picked.index(1)].clone()))
    }

    /// 发起一次请求；节点不足两个时什么也不做
    pub fn step<R: Rng>(&mut self, sim: &OcsSimulator<R>) -> Option<ConnectionResult> {
        let names = sim.node_names();
        let (src, dst) = self.pick_pair(&names)?;
        debug!(%src, %dst, "发起随机请求");
        Some(sim.simulate_connection(&src, &dst, self.mode, self.allow_conversion))
    }

    /// 连续发起 `requests` 次请求
    #[tracing::instrument(skip(self, sim), fields(mode = %self.mode, allow_conversion = self.allow_conversion))]
    pub fn run<R: Rng>(&mut self, sim: &OcsSimulator<R>, requests: u64) -> TrafficSummary {
        let mut summary = TrafficSummary::default();
        for i in 0..requests {
            let Some(result) = self.step(sim) else {
                debug!("节点不足两个，停止发流量");
                break;
            };
            summary.record(&result);
            if !self.gap.is_zero() && i + 1 < requests {
                thread::sleep(self.gap);
            }
        }
        info!(
            requests = summary.requests,
            successful = summary.successful,
            blocked_no_path = summary.blocked_no_path,
            blocked_no_wavelength = summary.blocked_no_wavelength,
            "📈 流量结束"
        );
        summary
    }
}
