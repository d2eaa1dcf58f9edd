//! 链状拓扑构建

use rand::Rng;

use crate::error::Result;
use crate::sim::OcsSimulator;

/// 链状拓扑配置选项
#[derive(Debug, Clone)]
pub struct ChainOpts {
    pub len: usize,
    /// 节点名前缀，节点依次命名为 `{prefix}0..{prefix}{len-1}`
    pub prefix: String,
}

impl Default for ChainOpts {
    fn default() -> Self {
        Self {
            len: 3,
            prefix: "n".to_string(),
        }
    }
}

/// 构建链状拓扑
///
/// 拓扑结构：n0 <-> n1 <-> ... <-> n{len-1}
/// 返回：按顺序排列的节点名
pub fn build_chain<R: Rng>(sim: &OcsSimulator<R>, opts: &ChainOpts) -> Result<Vec<String>> {
    let names: Vec<String> = (0..opts.len).map(|i| format!("{}{i}", opts.prefix)).collect();
    for n in &names {
        sim.add_node(n);
    }
    for pair in names.windows(2) {
        sim.add_link(&pair[0], &pair[1])?;
    }
    Ok(names)
}
