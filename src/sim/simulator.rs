//! 仿真器
//!
//! 光电路交换仿真引擎：持有拓扑、波长占用、QoS 计数器和随机源。
//!
//! 所有状态放在同一把互斥锁后面。一次 `simulate_connection` 的路由、
//! 波长扫描与占用、计数器更新都在同一个临界区内完成，临界区内不做 I/O
//! 也不挂起，因此并发调用者不会同时通过同一波长的空闲检查。拓扑变更与
//! 快照读取也走同一把锁。方法都接收 `&self`，可以放进 `Arc` 在线程间共享。

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::SimConfig;
use super::connection::{BlockReason, Connection, ConnectionResult};
use super::mode::SwitchingMode;
use super::snapshot::{LinkSnapshot, NetworkSnapshot, NodeSnapshot};
use crate::error::{Result, SimError};
use crate::net::{Network, NodeId, QosCounters, QosReport, round_to, shortest_path};
use crate::wdm::WavelengthAssigner;

struct SimState<R> {
    net: Network,
    counters: QosCounters,
    rng: R,
}

/// 光网络仿真器
pub struct OcsSimulator<R = StdRng> {
    config: SimConfig,
    assigner: WavelengthAssigner,
    state: Mutex<SimState<R>>,
}

impl OcsSimulator<StdRng> {
    /// 按配置创建仿真器；`config.seed` 为 None 时使用操作系统熵源
    pub fn new(config: SimConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> OcsSimulator<R> {
    /// 使用外部提供的随机源创建仿真器
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self> {
        config.validate()?;
        info!(
            wavelengths = config.wavelengths,
            converters = config.converters,
            "🚦 创建光网络仿真器"
        );
        Ok(Self {
            assigner: WavelengthAssigner::new(config.converters),
            state: Mutex::new(SimState {
                net: Network::new(config.wavelengths),
                counters: QosCounters::default(),
                rng,
            }),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn wavelengths(&self) -> usize {
        self.config.wavelengths
    }

    pub fn converters(&self) -> u32 {
        self.config.converters
    }

    // 锁中毒时继续使用内部状态：每个修改都先校验后写入，不会留下半更新的状态。
    fn lock(&self) -> MutexGuard<'_, SimState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_node(&self, name: &str) {
        self.lock().net.add_node(name);
    }

    pub fn add_link(&self, a: &str, b: &str) -> Result<()> {
        self.lock().net.add_link(a, b).map(|_| ())
    }

    pub fn fail_node(&self, name: &str) -> Result<()> {
        self.lock().net.fail_node(name)
    }

    pub fn repair_node(&self, name: &str) -> Result<()> {
        self.lock().net.repair_node(name)
    }

    /// 在当前活跃子图上求最短路径（不占用任何资源）
    pub fn shortest_path(&self, src: &str, dst: &str) -> Result<Vec<String>> {
        let st = self.lock();
        let path = route(&st.net, src, dst)?;
        Ok(st.net.path_names(&path))
    }

    /// 处理一次连接请求：路由 → 波长分配 → 采样 QoS → 更新计数器。
    ///
    /// 路由或分配失败都转换为 blocked 结果并计入阻塞数，不会返回错误。
    #[tracing::instrument(skip(self, mode), fields(mode = %mode))]
    pub fn simulate_connection(
        &self,
        src: &str,
        dst: &str,
        mode: SwitchingMode,
        allow_conversion: bool,
    ) -> ConnectionResult {
        let mut guard = self.lock();
        let st = &mut *guard;

        match self.try_connect(st, src, dst, mode, allow_conversion) {
            Ok(conn) => {
                info!(
                    path = ?conn.path,
                    delay = conn.delay,
                    throughput = conn.throughput,
                    "✅ 连接建立"
                );
                ConnectionResult::Success(conn)
            }
            Err(err) => {
                let reason = match err {
                    SimError::NoWavelength => BlockReason::NoWavelength,
                    _ => BlockReason::NoPath,
                };
                st.counters.record_blocked();
                info!(%reason, error = %err, blocked = st.counters.blocked, "⛔ 连接阻塞");
                ConnectionResult::Blocked { reason }
            }
        }
    }

    fn try_connect(
        &self,
        st: &mut SimState<R>,
        src: &str,
        dst: &str,
        mode: SwitchingMode,
        allow_conversion: bool,
    ) -> Result<Connection> {
        debug!("ROUTING");
        let path = route(&st.net, src, dst)?;

        debug!(hops = path.len() - 1, "ASSIGNING");
        let wavelengths = self.assigner.assign(&mut st.net, &path, allow_conversion)?;

        let (delay, throughput) = mode.sample(&mut st.rng);
        st.counters.record_success(delay, throughput);
        Ok(Connection {
            mode,
            path: st.net.path_names(&path),
            wavelengths,
            delay: round_to(delay, 4),
            throughput,
        })
    }

    /// 释放一条已建立连接占用的波长。
    ///
    /// 每条连接只能释放一次；第二次释放返回 `NotReserved` 且不改变状态。
    pub fn release_connection(&self, conn: &Connection) -> Result<()> {
        let mut guard = self.lock();
        let st = &mut *guard;
        let path = conn
            .path
            .iter()
            .map(|name| st.net.require_node(name))
            .collect::<Result<Vec<NodeId>>>()?;
        self.assigner.release(&mut st.net, &path, &conn.wavelengths)?;
        info!(path = ?conn.path, "♻️ 连接已释放");
        Ok(())
    }

    /// 当前 QoS 指标
    pub fn get_qos(&self) -> QosReport {
        self.lock().counters.report()
    }

    /// 原始计数器副本
    pub fn counters(&self) -> QosCounters {
        self.lock().counters
    }

    pub fn node_names(&self) -> Vec<String> {
        self.lock().net.nodes().map(|n| n.name().to_string()).collect()
    }

    pub fn nodes(&self) -> Vec<NodeSnapshot> {
        self.lock().net.nodes().map(NodeSnapshot::of).collect()
    }

    pub fn links(&self) -> Vec<LinkSnapshot> {
        let st = self.lock();
        st.net.links().map(|l| LinkSnapshot::of(&st.net, l)).collect()
    }

    /// 活跃子图的副本：未故障节点，以及两端都未故障的链路
    pub fn active_subgraph(&self) -> (Vec<String>, Vec<(String, String)>) {
        self.with_network(|net| {
            let nodes = net.active_nodes().map(|n| n.name().to_string()).collect();
            let links = net
                .active_links()
                .map(|l| {
                    let (a, b) = l.endpoints();
                    (net.name(a).to_string(), net.name(b).to_string())
                })
                .collect();
            (nodes, links)
        })
    }

    /// 在锁内以只读方式访问拓扑。
    ///
    /// 闭包执行期间一直持有引擎锁，闭包里不能再调用本仿真器的任何方法，否则死锁。
    pub(crate) fn with_network<T>(&self, f: impl FnOnce(&Network) -> T) -> T {
        f(&self.lock().net)
    }

    /// 一次性取得节点、链路和 QoS 的一致快照
    pub fn snapshot(&self) -> NetworkSnapshot {
        let st = self.lock();
        NetworkSnapshot {
            wavelengths: self.config.wavelengths,
            converters: self.config.converters,
            nodes: st.net.nodes().map(NodeSnapshot::of).collect(),
            links: st.net.links().map(|l| LinkSnapshot::of(&st.net, l)).collect(),
            qos: st.counters.report(),
        }
    }
}

fn route(net: &Network, src: &str, dst: &str) -> Result<Vec<NodeId>> {
    let no_path = || SimError::NoPath {
        src: src.to_string(),
        dst: dst.to_string(),
    };
    let (Some(s), Some(d)) = (net.node_id(src), net.node_id(dst)) else {
        debug!("端点未知");
        return Err(no_path());
    };
    shortest_path(net, s, d).ok_or_else(no_path)
}
