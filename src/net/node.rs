//! 节点类型
//!
//! 光交换节点：只有名字和故障标志，故障节点不参与路由。

use super::id::NodeId;

/// 网络节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    failed: bool,
}

impl Node {
    /// 创建新节点，初始为可用状态
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            failed: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn is_operational(&self) -> bool {
        !self.failed
    }

    pub(crate) fn set_failed(&mut self, failed: bool) {
        self.failed = failed;
    }
}
