//! 交换模式
//!
//! OCS/OBS/OPS 三种模式各有一组延迟与吞吐分布，只在连接成功时采样。

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// 反序列化走 `FromStr`，大小写不敏感；序列化固定为大写
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SwitchingMode {
    /// 光电路交换
    #[default]
    #[serde(rename = "OCS")]
    Ocs,
    /// 光突发交换
    #[serde(rename = "OBS")]
    Obs,
    /// 光分组交换
    #[serde(rename = "OPS")]
    Ops,
}

impl SwitchingMode {
    pub const ALL: [SwitchingMode; 3] = [Self::Ocs, Self::Obs, Self::Ops];

    /// 均匀分布的延迟区间（秒，闭区间）
    pub fn delay_range(self) -> (f64, f64) {
        match self {
            Self::Ocs => (0.2, 0.5),
            Self::Obs => (0.05, 0.2),
            Self::Ops => (0.01, 0.05),
        }
    }

    /// 吞吐的整数档位区间（闭区间），实际吞吐 = 档位 × 10 Mb/s
    pub fn throughput_steps(self) -> (u32, u32) {
        match self {
            Self::Ocs => (8, 10),
            Self::Obs => (6, 9),
            Self::Ops => (4, 8),
        }
    }

    /// 采样一次 (延迟秒, 吞吐 Mb/s)
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> (f64, u32) {
        let (lo, hi) = self.delay_range();
        let delay = rng.random_range(lo..=hi);
        let (s_lo, s_hi) = self.throughput_steps();
        let throughput = rng.random_range(s_lo..=s_hi) * 10;
        (delay, throughput)
    }
}

impl fmt::Display for SwitchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ocs => "OCS",
            Self::Obs => "OBS",
            Self::Ops => "OPS",
        };
        f.write_str(s)
    }
}

impl FromStr for SwitchingMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OCS" => Ok(Self::Ocs),
            "OBS" => Ok(Self::Obs),
            "OPS" => Ok(Self::Ops),
            _ => Err(SimError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for SwitchingMode {
    type Error = SimError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
