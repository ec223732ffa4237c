//! 链路兼容矩阵
//!
//! `compatible(x, y)` 当且仅当两条链路不干扰。矩阵对称，对角线恒为 false
//! （链路与自身共享端点）。

use std::fmt;

use super::clique::Clique;
use super::interference::interfere;
use crate::config::InterferenceModel;
use crate::error::SimResult;
use crate::mesh::{LinkId, Topology};

#[derive(Debug, Clone)]
pub struct CompatMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl CompatMatrix {
    /// 基于拓扑中的全部链路构建
    pub fn build(topo: &Topology, model: InterferenceModel) -> SimResult<Self> {
        let links = topo.links();
        let n = links.len();
        let mut cells = vec![false; n * n];
        for x in 0..n {
            for y in (x + 1)..n {
                let ok = !interfere(&links[x], &links[y], model, topo)?;
                cells[x * n + y] = ok;
                cells[y * n + x] = ok;
            }
        }
        Ok(Self { n, cells })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn is_compatible(&self, x: LinkId, y: LinkId) -> bool {
        x.0 < self.n && y.0 < self.n && self.cells[x.0 * self.n + y.0]
    }

    /// `x` 是否与团内所有链路兼容
    pub fn compatible_with_all(&self, x: LinkId, clique: &Clique) -> bool {
        clique.links().iter().all(|&l| self.is_compatible(x, l))
    }
}

impl fmt::Display for CompatMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for y in 0..self.n {
            write!(f, "{y:>3}")?;
        }
        writeln!(f)?;
        for x in 0..self.n {
            write!(f, "{x:>3} ")?;
            for y in 0..self.n {
                write!(f, "{:>3}", u8::from(self.cells[x * self.n + y]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
