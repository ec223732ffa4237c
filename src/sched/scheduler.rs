//! 团覆盖调度器
//!
//! 一次调度调用的流程：
//! 1. 对全部链路构建兼容矩阵；
//! 2. 以每条有需求的链路为种子，按链路顺序贪心加入与团内所有链路兼容的有需求链路，
//!    得到一个极大团；去重后保留，并展开其所有子团；
//!    每条有需求链路的单链路团都是其种子团的子团，因此已在候选池中；
//! 3. 反复选出增益最大的团（并列取先找到的），增益或权重大于 0 时加入调度，
//!    然后从候选池中删除所有与之相交的团，直到候选池为空。
//!
//! 子团数量随团大小指数增长；有需求的链路通常远少于链路总数。

use std::collections::HashSet;

use super::clique::Clique;
use super::compat::CompatMatrix;
use crate::config::InterferenceModel;
use crate::error::SimResult;
use crate::mesh::{LinkId, Topology};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Scheduler {
    demand: Vec<u32>,
    compat: CompatMatrix,
    cliques: Vec<Clique>,
    seen: HashSet<Vec<LinkId>>,
}

impl Scheduler {
    /// 拍下当前需求快照并构建兼容矩阵
    pub fn new(topo: &Topology, model: InterferenceModel) -> SimResult<Self> {
        let compat = CompatMatrix::build(topo, model)?;
        trace!(matrix = %compat, "兼容矩阵");
        Ok(Self {
            demand: topo.demand(),
            compat,
            cliques: Vec::new(),
            seen: HashSet::new(),
        })
    }

    pub fn demand(&self) -> &[u32] {
        &self.demand
    }

    /// 需求大于 0 的链路（按 id 升序）
    pub fn active_links(&self) -> Vec<LinkId> {
        self.demand
            .iter()
            .enumerate()
            .filter(|(_, req)| **req > 0)
            .map(|(i, _)| LinkId(i))
            .collect()
    }

    fn insert_unique(&mut self, c: Clique) -> bool {
        if c.is_empty() || !self.seen.insert(c.key()) {
            return false;
        }
        self.cliques.push(c);
        true
    }

    /// 枚举候选团（种子极大团及其全部子团），按发现顺序返回。
    pub fn enumerate_cliques(&mut self) -> &[Clique] {
        let active = self.active_links();

        for &seed in &active {
            let mut c = Clique::singleton(seed);
            for &other in &active {
                if other != seed && self.compat.compatible_with_all(other, &c) {
                    c.add_link(other);
                }
            }
            if self.insert_unique(c.clone()) {
                for sub in c.subsets() {
                    self.insert_unique(sub);
                }
            }
        }

        debug!(
            active_links = active.len(),
            cliques = self.cliques.len(),
            "枚举候选团"
        );
        &self.cliques
    }

    /// 生成一轮调度：按时隙顺序排列、两两不相交的团。
    #[tracing::instrument(skip(self))]
    pub fn generate_schedule(mut self) -> Vec<Clique> {
        self.enumerate_cliques();
        let demand = self.demand;
        let mut pool = self.cliques;
        let mut schedule = Vec::new();

        while !pool.is_empty() {
            let mut best = 0;
            let mut best_gain = pool[0].gain(&demand);
            for (i, c) in pool.iter().enumerate().skip(1) {
                let g = c.gain(&demand);
                if g > best_gain {
                    best = i;
                    best_gain = g;
                }
            }

            let chosen = pool.remove(best);
            let weight = chosen.weight(&demand);
            trace!(clique = %chosen, gain = best_gain, weight, "选中团");

            pool.retain(|c| !c.intersects(&chosen));
            if best_gain > 0 || weight > 0 {
                schedule.push(chosen);
            }
        }

        debug!(rounds = schedule.len(), "生成调度");
        schedule
    }
}
