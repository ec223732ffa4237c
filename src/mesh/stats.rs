//! 统计信息
//!
//! 定义单轮仿真的计数与时延累计。

use serde::{Deserialize, Serialize};

use crate::sim::SimTime;

/// 单轮仿真统计
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// 被源路由器接收的数据包数
    pub packet_counter: u64,
    pub success_counter: u64,
    pub drop_counter: u64,
    /// 源路由器忙、被直接拒收的新包数（不计入 packet_counter）
    pub blocked_counter: u64,
    /// 成功送达包的累计时延
    pub delivered_delay: SimTime,
    /// 被丢弃包的累计时延
    pub dropped_delay: SimTime,
    pub schedules: u64,
    pub events: u64,
    pub final_time: SimTime,
}

impl RunStats {
    /// 投递率（百分比）
    pub fn delivery_ratio(&self) -> f64 {
        if self.packet_counter == 0 {
            return 0.0;
        }
        self.success_counter as f64 / self.packet_counter as f64 * 100.0
    }

    /// 成功包的平均时延（秒）
    pub fn avg_delivered_delay(&self) -> f64 {
        if self.success_counter == 0 {
            return 0.0;
        }
        self.delivered_delay.as_secs_f64() / self.success_counter as f64
    }

    /// 时延估计（秒）：只用成功包的低估值与计入丢包时延的高估值的平均，
    /// 两者都按已接收包数平均。
    pub fn avg_delay_estimate(&self) -> f64 {
        if self.packet_counter == 0 {
            return 0.0;
        }
        let pkts = self.packet_counter as f64;
        let low = self.delivered_delay.as_secs_f64();
        let high = low + self.dropped_delay.as_secs_f64();
        (low / pkts + high / pkts) / 2.0
    }

    /// 仍在网络中的包数
    pub fn in_flight(&self) -> u64 {
        self.packet_counter
            .saturating_sub(self.success_counter + self.drop_counter)
    }
}
