//! 仿真器配置

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

fn default_wavelengths() -> usize {
    4
}

/// 仿真器构造参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// 每条链路的波长数 W，实例生命周期内固定
    #[serde(default = "default_wavelengths")]
    pub wavelengths: usize,
    /// 波长转换器数量；只判断是否大于 0
    #[serde(default)]
    pub converters: u32,
    /// 延迟/吞吐采样的随机种子；None 时从操作系统取熵
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wavelengths: default_wavelengths(),
            converters: 0,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.wavelengths == 0 {
            return Err(SimError::InvalidConfig(
                "wavelengths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
