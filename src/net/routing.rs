//! 路由
//!
//! 在活跃子图（未故障节点及其之间的链路）上做无权最短路 BFS。
//! 邻居按链路插入顺序展开，先入队者先被发现，因此等长路径的选择在
//! 拓扑与插入顺序固定时是确定的。

use std::collections::VecDeque;

use super::id::NodeId;
use super::network::Network;
use tracing::{debug, trace};

/// 计算 `src` 到 `dst` 的最短跳数路径。
///
/// 任一端故障、`src == dst` 或两端在活跃子图中不连通时返回 `None`。
#[tracing::instrument(skip_all, fields(src = net.name(src), dst = net.name(dst)))]
pub fn shortest_path(net: &Network, src: NodeId, dst: NodeId) -> Option<Vec<NodeId>> {
    if src == dst {
        debug!("源与目的相同，没有可用路径");
        return None;
    }
    if !net.is_operational(src) || !net.is_operational(dst) {
        debug!("端点故障，没有可用路径");
        return None;
    }

    let n = net.node_count();
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut seen = vec![false; n];
    let mut q: VecDeque<NodeId> = VecDeque::new();

    seen[src.0] = true;
    q.push_back(src);

    while let Some(v) = q.pop_front() {
        if v == dst {
            break;
        }
        for nbr in net.active_neighbors(v) {
            if !seen[nbr.0] {
                seen[nbr.0] = true;
                prev[nbr.0] = Some(v);
                trace!(from = net.name(v), to = net.name(nbr), "发现节点");
                q.push_back(nbr);
            }
        }
    }

    if !seen[dst.0] {
        debug!("活跃子图中不连通");
        return None;
    }

    let mut path = vec![dst];
    let mut cur = dst;
    while let Some(p) = prev[cur.0] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    debug!(hops = path.len() - 1, "找到最短路径");
    Some(path)
}
