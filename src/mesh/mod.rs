//! 无线网状网络模块
//!
//! 此模块包含网状网络仿真的核心组件：路由器、链路、拓扑、贪心路由、统计，
//! 以及实现 `World` 的网状网络世界和各类事件处理函数。

// 子模块声明
mod id;
mod link;
mod mesh_world;
mod packet_events;
mod router;
mod routing;
mod schedule_events;
mod stats;
mod topology;

// 重新导出公共接口
pub use id::{LinkId, RouterId};
pub use link::Link;
pub use mesh_world::MeshWorld;
pub use router::{Point, Router};
pub use routing::GreedyRouting;
pub use stats::RunStats;
pub use topology::Topology;
