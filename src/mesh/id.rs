//! 标识符类型
//!
//! 定义路由器和链路的唯一标识符。

use serde::{Deserialize, Serialize};

/// 路由器标识符（同时是其在拓扑中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouterId(pub usize);

/// 链路标识符（同时是其在拓扑中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub usize);
