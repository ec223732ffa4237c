//! 网状路由器
//!
//! 定义路由器记录：位置、邻居、单包缓冲区以及忙碌/许可/重试状态。

use std::fmt;

use super::id::RouterId;

/// 平面坐标
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 欧氏距离
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 网状路由器
#[derive(Debug, Clone)]
pub struct Router {
    pub id: RouterId,
    pub pos: Point,
    /// 缓冲区中数据包的目的路由器；`None` 表示空
    pub buffer: Option<RouterId>,
    /// 正在发送
    pub busy: bool,
    /// 当前时隙是否允许发送
    pub permission: bool,
    /// 当前数据包在本路由器上连续 HOP 重试的次数
    pub retries: u32,
    pub neighbours: Vec<RouterId>,
    pub gateway: bool,
}

impl Router {
    /// 创建新路由器（缓冲区为空、无许可）
    pub fn new(id: RouterId, pos: Point) -> Self {
        Self {
            id,
            pos,
            buffer: None,
            busy: false,
            permission: false,
            retries: 0,
            neighbours: Vec::new(),
            gateway: false,
        }
    }

    /// 是否可以接收新数据包
    pub fn is_free(&self) -> bool {
        self.buffer.is_none() && !self.busy
    }

    /// 放入一个数据包并标记为忙碌
    pub fn occupy(&mut self, destination: RouterId) {
        self.buffer = Some(destination);
        self.busy = true;
    }

    /// 清空缓冲区并复位重试计数
    pub fn release(&mut self) {
        self.buffer = None;
        self.busy = false;
        self.retries = 0;
    }

    /// 每轮仿真开始前复位；不启用 FS 时许可恒为 true
    pub fn reset(&mut self, fs_enabled: bool) {
        self.release();
        self.permission = !fs_enabled;
    }

    pub fn add_neighbour(&mut self, id: RouterId) {
        if !self.neighbours.contains(&id) {
            self.neighbours.push(id);
        }
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neighbours = self
            .neighbours
            .iter()
            .map(|n| n.0.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "MR: {}\tX: {:.2}\tY: {:.2}\tPer: {}\tB: {}\tBusy: {}\tNeighbours: {}{}",
            self.id.0,
            self.pos.x,
            self.pos.y,
            self.permission,
            self.buffer.map_or_else(|| "-".to_string(), |d| d.0.to_string()),
            self.busy,
            neighbours,
            if self.gateway { "\tGW" } else { "" }
        )
    }
}
