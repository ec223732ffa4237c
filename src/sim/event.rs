//! 事件记录
//!
//! 定义仿真事件：时间戳、类型标签、源/目的路由器以及累计时延。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::SimTime;
use crate::error::{ConfigError, SimResult};
use crate::mesh::RouterId;

/// 事件类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// 新数据包到达源路由器
    New,
    /// 尝试向下一跳转发
    Hop,
    /// 数据包到达目的地
    Success,
    /// 数据包被丢弃
    Drop,
    /// 重新计算 FS 调度
    Schedule,
    /// 授予链路两端发送许可
    PermissionStart,
    /// 收回链路两端发送许可
    PermissionStop,
}

impl EventKind {
    /// 同一时刻内的处理顺序，越小越先。
    ///
    /// 数据包事件先于许可变化，使恰好在时隙结束时刻到来的 HOP 仍能使用该时隙；
    /// 收回先于授予，避免上一时隙的 STOP 覆盖相邻时隙对共享路由器的 START；
    /// SCHEDULE 最后，看到同一时刻所有 NEW 预留的需求。
    pub fn tie_rank(self) -> u8 {
        match self {
            EventKind::New | EventKind::Hop | EventKind::Success | EventKind::Drop => 0,
            EventKind::PermissionStop => 1,
            EventKind::PermissionStart => 2,
            EventKind::Schedule => 3,
        }
    }
}

/// 仿真事件。
///
/// `source`/`destination` 的含义随类型变化：
/// - NEW/HOP/SUCCESS/DROP：数据包当前所在路由器与最终目的路由器；
/// - PERMISSION_START/STOP：链路两端；
/// - SCHEDULE：两者均为 `None`。
///
/// 构造后只读；`delay` 在逐跳之间由处理函数携带到下一个事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
    pub source: Option<RouterId>,
    pub destination: Option<RouterId>,
    /// 自数据包产生以来累计的时延
    pub delay: SimTime,
}

impl Event {
    fn packet(kind: EventKind, time: SimTime, source: RouterId, destination: RouterId) -> Self {
        Self {
            time,
            kind,
            source: Some(source),
            destination: Some(destination),
            delay: SimTime::ZERO,
        }
    }

    pub fn new_packet(time: SimTime, source: RouterId, destination: RouterId) -> Self {
        Self::packet(EventKind::New, time, source, destination)
    }

    pub fn hop(time: SimTime, source: RouterId, destination: RouterId, delay: SimTime) -> Self {
        Self::packet(EventKind::Hop, time, source, destination).with_delay(delay)
    }

    pub fn success(time: SimTime, at: RouterId, destination: RouterId, delay: SimTime) -> Self {
        Self::packet(EventKind::Success, time, at, destination).with_delay(delay)
    }

    pub fn drop(time: SimTime, at: RouterId, destination: RouterId, delay: SimTime) -> Self {
        Self::packet(EventKind::Drop, time, at, destination).with_delay(delay)
    }

    pub fn schedule(time: SimTime) -> Self {
        Self {
            time,
            kind: EventKind::Schedule,
            source: None,
            destination: None,
            delay: SimTime::ZERO,
        }
    }

    pub fn permission_start(time: SimTime, a: RouterId, b: RouterId) -> Self {
        Self::packet(EventKind::PermissionStart, time, a, b)
    }

    pub fn permission_stop(time: SimTime, a: RouterId, b: RouterId) -> Self {
        Self::packet(EventKind::PermissionStop, time, a, b)
    }

    pub fn with_delay(mut self, delay: SimTime) -> Self {
        self.delay = delay;
        self
    }

    /// 取出源/目的；缺失说明事件流本身有问题。
    pub fn endpoints(&self) -> SimResult<(RouterId, RouterId)> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) => Ok((s, d)),
            _ => Err(ConfigError::MalformedEvent { kind: self.kind }.into()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = |r: Option<RouterId>| r.map_or_else(|| "-".to_string(), |r| r.0.to_string());
        write!(
            f,
            "E: {:?}\tS: {}\tD: {}\tT: {}",
            self.kind,
            id(self.source),
            id(self.destination),
            self.time
        )
    }
}
