//! 仿真模块
//!
//! 连接仿真器（路由 → 波长分配 → QoS 采样）、交换模式、配置、场景加载和流量驱动。

// 子模块声明
mod config;
mod connection;
mod mode;
mod scenario;
mod simulator;
mod snapshot;
mod traffic;

// 重新导出公共接口
pub use config::SimConfig;
pub use connection::{BlockReason, Connection, ConnectionResult};
pub use mode::SwitchingMode;
pub use scenario::{ScenarioSpec, TrafficSpec};
pub use simulator::OcsSimulator;
pub use snapshot::{LinkLoad, LinkSnapshot, NetworkSnapshot, NodeSnapshot};
pub use traffic::{TrafficGenerator, TrafficSummary};
