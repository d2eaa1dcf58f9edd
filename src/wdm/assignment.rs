//! 波长分配
//!
//! 先尝试满足波长连续性约束的 first-fit；失败且允许转换时逐跳 first-fit。
//! 调用方负责持有拓扑锁，使"扫描 + 占用"对其他连接是原子的。

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::{Result, SimError};
use crate::net::{LinkId, Network, NodeId};

/// 一条路径上的波长分配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WavelengthAssignment {
    /// 全路径使用同一波长
    Continuous { wavelength: usize, hops: usize },
    /// 每跳各自的波长（需要波长转换）
    Converted { per_hop: Vec<usize> },
}

impl WavelengthAssignment {
    pub fn hops(&self) -> usize {
        match self {
            Self::Continuous { hops, .. } => *hops,
            Self::Converted { per_hop } => per_hop.len(),
        }
    }

    /// 第 `hop` 跳使用的波长
    pub fn wavelength_at(&self, hop: usize) -> usize {
        match self {
            Self::Continuous { wavelength, .. } => *wavelength,
            Self::Converted { per_hop } => per_hop[hop],
        }
    }

    /// 展开为逐跳波长序列
    pub fn per_hop(&self) -> Vec<usize> {
        (0..self.hops()).map(|h| self.wavelength_at(h)).collect()
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// 波长分配器
///
/// `converters` 只作为开关使用：大于 0 即允许任意多条连接同时做逐跳转换，
/// 不跟踪正在使用的转换器数量。
#[derive(Debug, Clone, Copy)]
pub struct WavelengthAssigner {
    converters: u32,
}

impl WavelengthAssigner {
    pub fn new(converters: u32) -> Self {
        Self { converters }
    }

    pub fn converters(&self) -> u32 {
        self.converters
    }

    pub fn conversion_available(&self) -> bool {
        self.converters > 0
    }

    /// 在 `path` 上分配并占用波长。失败时不留下任何占用。
    #[tracing::instrument(skip_all, fields(hops = path.len().saturating_sub(1), allow_conversion = allow_conversion))]
    pub fn assign(
        &self,
        net: &mut Network,
        path: &[NodeId],
        allow_conversion: bool,
    ) -> Result<WavelengthAssignment> {
        let links = hop_links(net, path)?;

        if let Some(w) = first_common_free(net, &links) {
            for &l in &links {
                net.link_mut(l).reserve(w);
            }
            info!(wavelength = w, "🌈 连续波长分配成功");
            return Ok(WavelengthAssignment::Continuous {
                wavelength: w,
                hops: links.len(),
            });
        }
        debug!("没有满足连续性约束的波长");

        if !(allow_conversion && self.conversion_available()) {
            debug!(converters = self.converters, "不允许波长转换");
            return Err(SimError::NoWavelength);
        }

        let mut per_hop = Vec::with_capacity(links.len());
        for (hop, &l) in links.iter().enumerate() {
            match net.link(l).first_free() {
                Some(w) => {
                    net.link_mut(l).reserve(w);
                    trace!(hop, wavelength = w, "逐跳占用");
                    per_hop.push(w);
                }
                None => {
                    debug!(hop, rollback = per_hop.len(), "该跳无空闲波长，回滚已占用的跳");
                    for (&l, &w) in links.iter().zip(&per_hop) {
                        net.link_mut(l).release(w);
                    }
                    return Err(SimError::NoWavelength);
                }
            }
        }
        info!(per_hop = ?per_hop, "🔀 波长转换分配成功");
        Ok(WavelengthAssignment::Converted { per_hop })
    }

    /// 释放 `assign` 在 `path` 上占用的波长。
    ///
    /// 先检查每一跳的波长确实处于占用状态，任何一跳不满足则不修改状态。
    #[tracing::instrument(skip_all, fields(hops = assignment.hops()))]
    pub fn release(
        &self,
        net: &mut Network,
        path: &[NodeId],
        assignment: &WavelengthAssignment,
    ) -> Result<()> {
        let links = hop_links(net, path)?;
        if links.len() != assignment.hops() {
            return Err(SimError::HopMismatch {
                expected: links.len(),
                got: assignment.hops(),
            });
        }

        for (hop, &l) in links.iter().enumerate() {
            let w = assignment.wavelength_at(hop);
            let link = net.link(l);
            if w >= link.wavelength_count() || link.is_free(w) {
                let (a, b) = link.endpoints();
                return Err(SimError::NotReserved {
                    a: net.name(a).to_string(),
                    b: net.name(b).to_string(),
                    wavelength: w,
                });
            }
        }

        for (hop, &l) in links.iter().enumerate() {
            net.link_mut(l).release(assignment.wavelength_at(hop));
        }
        debug!("♻️ 波长已释放");
        Ok(())
    }
}

fn hop_links(net: &Network, path: &[NodeId]) -> Result<Vec<LinkId>> {
    if path.len() < 2 {
        return Err(SimError::ShortPath(path.len()));
    }
    net.path_links(path)
}

/// 所有跳上都空闲的最小波长下标
fn first_common_free(net: &Network, links: &[LinkId]) -> Option<usize> {
    (0..net.wavelength_count()).find(|&w| links.iter().all(|&l| net.link(l).is_free(w)))
}
