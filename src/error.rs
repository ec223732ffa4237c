//! 错误类型
//!
//! 区分两类致命错误：
//! - `ConfigError`：输入（拓扑、事件流、参数）有问题，仿真无法继续；
//! - `InvariantError`：内部簿记出错（例如需求计数被减到负数），说明代码有 bug。
//!
//! 竞争/背压（缓冲区满、没有发送许可）不是错误，由重试/丢包策略处理。

use thiserror::Error;

use crate::mesh::{LinkId, RouterId};
use crate::sim::EventKind;

/// 仿真统一结果类型
pub type SimResult<T> = Result<T, SimError>;

/// 仿真错误
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("event queue is empty")]
    EmptyQueue,
}

impl SimError {
    /// 是否为内部不变量被破坏（而不是输入错误）
    pub fn is_invariant(&self) -> bool {
        matches!(self, SimError::Invariant(_))
    }
}

/// 配置/输入错误：拓扑或事件流不合法
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("requested {requested} gateways but topology only has {routers} routers")]
    TooManyGateways { requested: usize, routers: usize },

    #[error("router {router:?} has no neighbours")]
    NoNeighbour { router: RouterId },

    #[error("topology has no routers")]
    EmptyTopology,

    #[error("topology has no gateway")]
    NoGateway,

    #[error("no router within client range of ({x:.2}, {y:.2}); coverage has dead spots")]
    CoverageGap { x: f64, y: f64 },

    #[error("greedy route from {from:?} to {to:?} did not converge within {hops} hops")]
    RoutingLoop {
        from: RouterId,
        to: RouterId,
        hops: usize,
    },

    #[error("unknown router {0:?}")]
    UnknownRouter(RouterId),

    #[error("{kind:?} event is missing its source/destination")]
    MalformedEvent { kind: EventKind },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// 内部不变量错误：需求簿记或查表失败
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvariantError {
    #[error("requirement of link {link:?} would drop below zero")]
    RequirementUnderflow { link: LinkId },

    #[error("unknown link {0:?}")]
    UnknownLinkId(LinkId),

    #[error("no link from {from:?} to {to:?}")]
    UnknownLink { from: RouterId, to: RouterId },

    #[error("router {router:?} is busy with an empty buffer")]
    BusyWithoutPacket { router: RouterId },
}
