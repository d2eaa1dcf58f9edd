//! 网络拓扑管理
//!
//! 拓扑存储：节点（含故障标志）、规范化的无向链路以及每条链路的波长占用向量。
//! 邻接表按链路插入顺序保存，路由据此得到确定性的结果。

use std::collections::HashMap;

use super::id::{LinkId, LinkKey, NodeId};
use super::link::Link;
use super::node::Node;
use crate::error::{Result, SimError};
use tracing::{debug, info, trace, warn};

/// 网络拓扑
#[derive(Debug, Clone)]
pub struct Network {
    wavelength_count: usize,
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
    links: Vec<Link>,
    edges: HashMap<LinkKey, LinkId>,
    /// adj[n]：按插入顺序排列的 (邻居, 链路)
    adj: Vec<Vec<(NodeId, LinkId)>>,
}

impl Network {
    /// 创建空拓扑，每条链路有 `wavelength_count` 个波长
    pub fn new(wavelength_count: usize) -> Self {
        Self {
            wavelength_count,
            nodes: Vec::new(),
            by_name: HashMap::new(),
            links: Vec::new(),
            edges: HashMap::new(),
            adj: Vec::new(),
        }
    }

    pub fn wavelength_count(&self) -> usize {
        self.wavelength_count
    }

    /// 添加节点；同名节点已存在时直接返回原 id
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.by_name.get(name) {
            trace!(node = name, id = ?id, "节点已存在，忽略");
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name));
        self.by_name.insert(name.to_string(), id);
        self.adj.push(Vec::new());
        info!(node = name, id = ?id, "➕ 添加节点");
        id
    }

    /// 连接两个节点（创建无向链路）。
    ///
    /// 两端都必须已存在；重复添加同一条链路不会清空其占用状态。
    pub fn add_link(&mut self, a: &str, b: &str) -> Result<LinkId> {
        let ia = self.require_node(a)?;
        let ib = self.require_node(b)?;
        if ia == ib {
            warn!(node = a, "拒绝自环链路");
            return Err(SimError::InvalidLink {
                a: a.to_string(),
                b: b.to_string(),
            });
        }

        let key = LinkKey::new(ia, ib);
        if let Some(&id) = self.edges.get(&key) {
            trace!(a, b, link_id = ?id, "链路已存在，忽略");
            return Ok(id);
        }

        let id = LinkId(self.links.len());
        self.links.push(Link::new(ia, ib, self.wavelength_count));
        self.edges.insert(key, id);
        self.adj[ia.0].push((ib, id));
        self.adj[ib.0].push((ia, id));
        info!(a, b, link_id = ?id, wavelengths = self.wavelength_count, "🔗 添加链路");
        Ok(id)
    }

    pub fn fail_node(&mut self, name: &str) -> Result<()> {
        self.set_failed(name, true)
    }

    pub fn repair_node(&mut self, name: &str) -> Result<()> {
        self.set_failed(name, false)
    }

    fn set_failed(&mut self, name: &str, failed: bool) -> Result<()> {
        let id = self.require_node(name)?;
        self.nodes[id.0].set_failed(failed);
        if failed {
            info!(node = name, "💥 节点故障");
        } else {
            info!(node = name, "🔧 节点修复");
        }
        Ok(())
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn require_node(&self, name: &str) -> Result<NodeId> {
        self.node_id(name).ok_or_else(|| {
            warn!(node = name, "未知节点");
            SimError::UnknownNode(name.to_string())
        })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.nodes[id.0].name()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub(crate) fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.0]
    }

    /// 查找两节点间的链路，与端点顺序无关
    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        self.edges.get(&LinkKey::new(a, b)).copied()
    }

    pub fn is_operational(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_operational()
    }

    /// 活跃子图中的节点
    pub fn active_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_operational())
    }

    /// 活跃子图中的链路：两端都未故障
    pub fn active_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| {
            let (a, b) = l.endpoints();
            self.is_operational(a) && self.is_operational(b)
        })
    }

    /// `n` 在活跃子图中的邻居，按链路插入顺序。`n` 自身故障时为空。
    pub fn active_neighbors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let live = self.is_operational(n);
        self.adj[n.0]
            .iter()
            .filter(move |(nbr, _)| live && self.is_operational(*nbr))
            .map(|(nbr, _)| *nbr)
    }

    /// 把节点序列转换为逐跳链路序列
    pub fn path_links(&self, path: &[NodeId]) -> Result<Vec<LinkId>> {
        let links = path
            .windows(2)
            .map(|hop| {
                self.link_between(hop[0], hop[1])
                    .ok_or_else(|| SimError::UnknownLink {
                        a: self.name(hop[0]).to_string(),
                        b: self.name(hop[1]).to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(hops = links.len(), "解析路径链路");
        Ok(links)
    }

    /// 把节点序列转换为名字序列
    pub fn path_names(&self, path: &[NodeId]) -> Vec<String> {
        path.iter().map(|&n| self.name(n).to_string()).collect()
    }
}
