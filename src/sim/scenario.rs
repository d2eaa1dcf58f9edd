//! 场景文件
//!
//! JSON 场景：拓扑、初始故障节点，以及可选的引擎参数与流量参数。

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::SimConfig;
use super::mode::SwitchingMode;
use super::simulator::OcsSimulator;
use crate::error::Result;

/// 场景描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub sim: Option<SimConfig>,
    pub nodes: Vec<String>,
    /// 无向链路，写成 `["a", "b"]`
    #[serde(default)]
    pub links: Vec<(String, String)>,
    /// 开始时即为故障的节点
    #[serde(default)]
    pub failed: Vec<String>,
    #[serde(default)]
    pub traffic: Option<TrafficSpec>,
}

/// 流量参数；缺省字段由命令行或默认值补齐
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficSpec {
    #[serde(default)]
    pub requests: Option<u64>,
    #[serde(default)]
    pub mode: Option<SwitchingMode>,
    #[serde(default)]
    pub allow_conversion: Option<bool>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// 两次请求之间的间隔（毫秒）
    #[serde(default)]
    pub gap_ms: Option<u64>,
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// 引擎配置；没有 `sim` 字段时使用默认值
    pub fn sim_config(&self) -> SimConfig {
        self.sim.clone().unwrap_or_default()
    }

    /// 依次添加节点、链路，再把故障节点置为故障。
    ///
    /// 遇到引用未知节点的链路或故障项时立即返回错误。
    pub fn apply<R: Rng>(&self, sim: &OcsSimulator<R>) -> Result<()> {
        for n in &self.nodes {
            sim.add_node(n);
        }
        for (a, b) in &self.links {
            sim.add_link(a, b)?;
        }
        for n in &self.failed {
            sim.fail_node(n)?;
        }
        info!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            failed = self.failed.len(),
            "📄 场景已加载"
        );
        Ok(())
    }

    /// 按 `sim_config()` 新建引擎并载入拓扑
    pub fn build(&self) -> Result<OcsSimulator> {
        let sim = OcsSimulator::new(self.sim_config())?;
        self.apply(&sim)?;
        Ok(sim)
    }
}
