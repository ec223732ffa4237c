use serde::{Deserialize, Serialize};

use crate::mesh::RouterId;
use crate::sim::{Event, EventKind};

/// 一条已处理事件的记录（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    pub kind: EventKind,
    pub source: Option<usize>,
    pub destination: Option<usize>,
    /// 累计时延（纳秒）；仅数据包事件有意义
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ns: Option<u64>,
}

impl From<&Event> for TraceEvent {
    fn from(ev: &Event) -> Self {
        let carries_delay = matches!(
            ev.kind,
            EventKind::Hop | EventKind::Success | EventKind::Drop
        );
        Self {
            t_ns: ev.time.0,
            kind: ev.kind,
            source: ev.source.map(|r: RouterId| r.0),
            destination: ev.destination.map(|r: RouterId| r.0),
            delay_ns: carries_delay.then_some(ev.delay.0),
        }
    }
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default, Clone)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    /// 某类事件的数量
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}
