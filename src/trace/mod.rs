//! 事件追踪（用于离线分析/回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：只记录已处理事件的类型、时间与端点

mod types;

pub use types::{TraceEvent, TraceLogger};
