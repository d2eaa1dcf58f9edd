//! 链路类型
//!
//! 定义无向光纤链路及其波长占用向量。

use super::id::{LinkKey, NodeId};

/// 无向光纤链路
#[derive(Debug, Clone)]
pub struct Link {
    key: LinkKey,
    /// `wavelengths[w] == true` 表示波长 w 已被某条连接占用。长度在创建后固定。
    wavelengths: Vec<bool>,
}

impl Link {
    /// 创建新链路，所有波长空闲
    pub fn new(a: NodeId, b: NodeId, wavelength_count: usize) -> Self {
        Self {
            key: LinkKey::new(a, b),
            wavelengths: vec![false; wavelength_count],
        }
    }

    pub fn key(&self) -> LinkKey {
        self.key
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        self.key.endpoints()
    }

    /// 给定一端，返回另一端
    pub fn other(&self, n: NodeId) -> NodeId {
        let (a, b) = self.endpoints();
        if n == a { b } else { a }
    }

    pub fn wavelength_count(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn occupancy(&self) -> &[bool] {
        &self.wavelengths
    }

    pub fn is_free(&self, w: usize) -> bool {
        !self.wavelengths[w]
    }

    /// 按下标升序找第一个空闲波长（first-fit）
    pub fn first_free(&self) -> Option<usize> {
        self.wavelengths.iter().position(|used| !used)
    }

    pub fn in_use(&self) -> usize {
        self.wavelengths.iter().filter(|used| **used).count()
    }

    pub(crate) fn reserve(&mut self, w: usize) {
        debug_assert!(!self.wavelengths[w], "double booking of wavelength {w}");
        self.wavelengths[w] = true;
    }

    pub(crate) fn release(&mut self, w: usize) {
        debug_assert!(self.wavelengths[w], "releasing free wavelength {w}");
        self.wavelengths[w] = false;
    }
}
