//! 统计信息
//!
//! 累计 QoS 计数器与由其导出的 QoS 指标。

use serde::Serialize;

/// 进程生命周期内的累计计数器，只由连接仿真器修改
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct QosCounters {
    pub successful: u64,
    pub blocked: u64,
    /// 秒，未经舍入的延迟累加值
    pub total_delay: f64,
    /// Mb/s
    pub total_throughput: u64,
}

impl QosCounters {
    pub fn requests(&self) -> u64 {
        self.successful + self.blocked
    }

    pub(crate) fn record_success(&mut self, delay: f64, throughput: u32) {
        self.successful += 1;
        self.total_delay += delay;
        self.total_throughput += u64::from(throughput);
    }

    pub(crate) fn record_blocked(&mut self) {
        self.blocked += 1;
    }

    /// 计算展示用的 QoS 指标（已舍入）
    pub fn report(&self) -> QosReport {
        let total = self.requests();
        let blocking_probability = if total > 0 {
            self.blocked as f64 / total as f64
        } else {
            0.0
        };
        let (average_delay, average_throughput) = if self.successful > 0 {
            let s = self.successful as f64;
            (self.total_delay / s, self.total_throughput as f64 / s)
        } else {
            (0.0, 0.0)
        };
        QosReport {
            blocking_probability: round_to(blocking_probability, 3),
            average_delay: round_to(average_delay, 4),
            average_throughput: round_to(average_throughput, 2),
        }
    }
}

/// QoS 指标
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct QosReport {
    pub blocking_probability: f64,
    /// 秒
    pub average_delay: f64,
    /// Mb/s
    pub average_throughput: f64,
}

/// 保留 `digits` 位小数；恰好居中时取偶数（银行家舍入），0.125 保留两位得 0.12
pub fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round_ties_even() / scale
}
