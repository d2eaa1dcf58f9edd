//! 网络模型模块
//!
//! 此模块包含光网络拓扑的核心组件：节点、链路、拓扑存储、路由和 QoS 统计。

// 子模块声明
mod id;
mod link;
mod network;
mod node;
mod routing;
mod stats;

// 重新导出公共接口
pub use id::{LinkId, LinkKey, NodeId};
pub use link::Link;
pub use network::Network;
pub use node::Node;
pub use routing::shortest_path;
pub use stats::{QosCounters, QosReport, round_to};
