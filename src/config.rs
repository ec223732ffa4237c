//! 仿真参数
//!
//! 所有常量都可以从 JSON 文件读取，缺省字段取参考实验使用的默认值。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::SimTime;

/// 干扰模型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterferenceModel {
    /// 共享端点即干扰
    #[default]
    SharedEndpoint,
    /// 共享端点，或两条链路的端点间距离小于 `range`
    Range { range: f64 },
}

/// 拓扑生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    /// 六边形格点，网关随机选取
    #[default]
    Hexagonal,
    /// 方形网格，网关尽量分散
    Grid,
}

/// 新数据包的源路由器选择方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OriginModel {
    /// 区域内随机取点，交给 `client_range` 内最近的路由器
    #[default]
    RandomPoint,
    /// 均匀随机选一个路由器
    UniformRouter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub kind: TopologyKind,
    pub max_x: f64,
    pub max_y: f64,
    /// 路由器之间的通信距离
    pub router_range: f64,
    /// 终端到路由器的接入距离
    pub client_range: f64,
    pub num_gateways: usize,
    /// 仅 grid 使用
    pub num_routers: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            kind: TopologyKind::Hexagonal,
            max_x: 80.0,
            max_y: 80.0,
            router_range: 120.0,
            client_range: 60.0,
            num_gateways: 1,
            num_routers: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 仿真时间上限（秒）
    pub end_secs: f64,
    /// 最多产生多少个数据包
    pub num_packets: u64,
    /// 平均到达间隔（秒）
    pub mean_secs: f64,
    /// 每跳时延（秒）
    pub hop_delay_secs: f64,
    pub max_retries: u32,
    /// 重试退避上限（秒），实际退避在 [0, max) 内均匀分布
    pub max_retry_time_secs: f64,
    pub fs_enabled: bool,
    pub repeats: u32,
    /// 上行包所占比例：1.0 表示全部上行，0.0 表示全部下行
    pub updown_ratio: f64,
    pub origin: OriginModel,
    pub seed: Option<u64>,
    pub display_progress: bool,
    pub interference: InterferenceModel,
    pub topology: TopologyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            end_secs: 300.0,
            num_packets: 10_000,
            mean_secs: 0.1,
            hop_delay_secs: 0.01,
            max_retries: 1,
            max_retry_time_secs: 0.05,
            fs_enabled: true,
            repeats: 10,
            updown_ratio: 1.0,
            origin: OriginModel::RandomPoint,
            seed: None,
            display_progress: true,
            interference: InterferenceModel::SharedEndpoint,
            topology: TopologyConfig::default(),
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

impl SimConfig {
    /// 解析 JSON 配置（缺省字段使用默认值）并校验
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig =
            serde_json::from_str(raw).map_err(|e| invalid("config", e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.end_secs >= 0.0) {
            return Err(invalid("end_secs", "must be >= 0"));
        }
        if !(self.mean_secs > 0.0) || self.mean() == SimTime::ZERO {
            return Err(invalid("mean_secs", "must be at least 1ns"));
        }
        if !(self.hop_delay_secs > 0.0) || self.hop_delay() == SimTime::ZERO {
            return Err(invalid("hop_delay_secs", "must be at least 1ns"));
        }
        if !(self.max_retry_time_secs >= 0.0) {
            return Err(invalid("max_retry_time_secs", "must be >= 0"));
        }
        if self.repeats == 0 {
            return Err(invalid("repeats", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.updown_ratio) {
            return Err(invalid("updown_ratio", "must be within [0, 1]"));
        }
        if let InterferenceModel::Range { range } = self.interference {
            if !(range >= 0.0) {
                return Err(invalid("interference.range", "must be >= 0"));
            }
        }
        let t = &self.topology;
        if !(t.max_x > 0.0 && t.max_y > 0.0) {
            return Err(invalid("topology.max_x/max_y", "must be > 0"));
        }
        if !(t.router_range > 0.0) {
            return Err(invalid("topology.router_range", "must be > 0"));
        }
        if t.num_gateways == 0 {
            return Err(invalid("topology.num_gateways", "must be at least 1"));
        }
        if t.kind == TopologyKind::Grid && t.num_routers == 0 {
            return Err(invalid("topology.num_routers", "must be at least 1"));
        }
        Ok(())
    }

    pub fn end(&self) -> SimTime {
        SimTime::from_secs_f64(self.end_secs)
    }

    pub fn mean(&self) -> SimTime {
        SimTime::from_secs_f64(self.mean_secs)
    }

    pub fn hop_delay(&self) -> SimTime {
        SimTime::from_secs_f64(self.hop_delay_secs)
    }

    pub fn max_retry_time(&self) -> SimTime {
        SimTime::from_secs_f64(self.max_retry_time_secs)
    }
}
