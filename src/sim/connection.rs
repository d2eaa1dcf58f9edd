//! 连接请求的结果

use std::fmt;

use serde::Serialize;

use super::mode::SwitchingMode;
use crate::wdm::WavelengthAssignment;

/// 阻塞原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    NoPath,
    NoWavelength,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPath => f.write_str("No path"),
            Self::NoWavelength => f.write_str("No wavelength"),
        }
    }
}

/// 成功建立的光路
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub mode: SwitchingMode,
    /// 节点名序列，至少两个节点
    pub path: Vec<String>,
    pub wavelengths: WavelengthAssignment,
    /// 秒，保留 4 位小数
    pub delay: f64,
    /// Mb/s
    pub throughput: u32,
}

/// 一次 `simulate_connection` 的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionResult {
    Success(Connection),
    Blocked { reason: BlockReason },
}

impl ConnectionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn connection(&self) -> Option<&Connection> {
        match self {
            Self::Success(c) => Some(c),
            Self::Blocked { .. } => None,
        }
    }

    pub fn block_reason(&self) -> Option<BlockReason> {
        match self {
            Self::Success(_) => None,
            Self::Blocked { reason } => Some(*reason),
        }
    }
}
