//! 错误类型
//!
//! 拓扑配置错误同步返回给调用方；路由/波长分配失败在连接仿真器内部
//! 转换为 blocked 结果，不会向外传播。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("invalid link {a}-{b}: self loops are not allowed")]
    InvalidLink { a: String, b: String },

    #[error("no link between {a} and {b}")]
    UnknownLink { a: String, b: String },

    #[error("a path needs at least two nodes, got {0}")]
    ShortPath(usize),

    #[error("no path from {src} to {dst} in the active subgraph")]
    NoPath { src: String, dst: String },

    #[error("no free wavelength along the path")]
    NoWavelength,

    #[error("wavelength {wavelength} is not reserved on link {a}-{b}")]
    NotReserved {
        a: String,
        b: String,
        wavelength: usize,
    },

    #[error("assignment has {got} hops but path has {expected}")]
    HopMismatch { expected: usize, got: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown switching mode: {0} (expected OCS, OBS or OPS)")]
    UnknownMode(String),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
