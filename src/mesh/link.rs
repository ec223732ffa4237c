//! 链路类型
//!
//! 定义有向链路（用于路由）及其需求计数。干扰判断对方向不敏感。

use std::fmt;

use super::id::{LinkId, RouterId};

/// 网状网络链路
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub source: RouterId,
    pub destination: RouterId,
    /// 预计会经过该链路、尚未离开的数据包数
    pub requirement: u32,
}

impl Link {
    /// 创建新链路
    pub fn new(id: LinkId, source: RouterId, destination: RouterId) -> Self {
        Self {
            id,
            source,
            destination,
            requirement: 0,
        }
    }

    /// 两条链路是否共享端点
    pub fn shares_endpoint(&self, other: &Link) -> bool {
        self.source == other.source
            || self.source == other.destination
            || self.destination == other.source
            || self.destination == other.destination
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L: {}\tS: {}\tD: {}\tReq: {}",
            self.id.0, self.source.0, self.destination.0, self.requirement
        )
    }
}
