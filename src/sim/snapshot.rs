//! 只读快照
//!
//! 提供给可视化层的拓扑/占用/QoS 副本，与引擎内部状态不共享任何引用。

use serde::Serialize;

use crate::net::{Link, Network, Node, QosReport};

/// 链路负载等级（用于着色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkLoad {
    /// 没有波长被占用
    Free,
    /// 占用数少于 W/2（整数除法）
    Light,
    Heavy,
}

impl LinkLoad {
    pub fn classify(in_use: usize, wavelengths: usize) -> Self {
        if in_use == 0 {
            Self::Free
        } else if in_use < wavelengths / 2 {
            Self::Light
        } else {
            Self::Heavy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub failed: bool,
}

impl NodeSnapshot {
    pub(crate) fn of(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
            failed: node.is_failed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSnapshot {
    pub a: String,
    pub b: String,
    pub wavelengths: Vec<bool>,
    /// 已占用的波长下标
    pub active: Vec<usize>,
    pub load: LinkLoad,
}

impl LinkSnapshot {
    pub(crate) fn of(net: &Network, link: &Link) -> Self {
        let (a, b) = link.endpoints();
        let wavelengths = link.occupancy().to_vec();
        let active: Vec<usize> = wavelengths
            .iter()
            .enumerate()
            .filter_map(|(w, used)| used.then_some(w))
            .collect();
        let load = LinkLoad::classify(active.len(), wavelengths.len());
        Self {
            a: net.name(a).to_string(),
            b: net.name(b).to_string(),
            wavelengths,
            active,
            load,
        }
    }

    /// 展示用标签，例如 `λ0,λ2`；全部空闲时为 `Free`
    pub fn label(&self) -> String {
        if self.active.is_empty() {
            return "Free".to_string();
        }
        self.active
            .iter()
            .map(|w| format!("λ{w}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// 完整快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub wavelengths: usize,
    pub converters: u32,
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<LinkSnapshot>,
    pub qos: QosReport,
}
