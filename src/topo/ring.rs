//! 环形拓扑构建

use rand::Rng;

use super::chain::{ChainOpts, build_chain};
use crate::error::Result;
use crate::sim::OcsSimulator;

#[derive(Debug, Clone)]
pub struct RingOpts {
    pub len: usize,
    pub prefix: String,
}

impl Default for RingOpts {
    fn default() -> Self {
        Self {
            len: 6,
            prefix: "n".to_string(),
        }
    }
}

/// 构建环形拓扑：链状拓扑再把首尾相连。`len < 3` 时退化为链。
pub fn build_ring<R: Rng>(sim: &OcsSimulator<R>, opts: &RingOpts) -> Result<Vec<String>> {
    let names = build_chain(
        sim,
        &ChainOpts {
            len: opts.len,
            prefix: opts.prefix.clone(),
        },
    )?;
    if names.len() >= 3
        && let [first, .., last] = names.as_slice()
    {
        sim.add_link(last, first)?;
    }
    Ok(names)
}
