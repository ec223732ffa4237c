//! 链路团
//!
//! 一组可以同时发送、互不干扰的链路。团只按 id 引用链路，
//! 权重与增益总是对照调用方给出的需求快照计算。

use std::fmt;

use crate::mesh::LinkId;

#[derive(Debug, Clone, Default)]
pub struct Clique {
    links: Vec<LinkId>,
}

impl Clique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(link: LinkId) -> Self {
        Self { links: vec![link] }
    }

    /// 按给定顺序构造，重复的 id 只保留第一次出现
    pub fn from_links(links: impl IntoIterator<Item = LinkId>) -> Self {
        let mut c = Self::new();
        for l in links {
            c.add_link(l);
        }
        c
    }

    /// 加入链路；已存在时返回 false
    pub fn add_link(&mut self, link: LinkId) -> bool {
        if self.contains(link) {
            return false;
        }
        self.links.push(link);
        true
    }

    pub fn contains(&self, link: LinkId) -> bool {
        self.links.contains(&link)
    }

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 规范键：排序后的链路 id，用于等价去重
    pub fn key(&self) -> Vec<LinkId> {
        let mut k = self.links.clone();
        k.sort_unstable();
        k
    }

    /// 链路集合完全相同（与加入顺序无关）
    pub fn equivalent(&self, other: &Clique) -> bool {
        self.len() == other.len() && self.links.iter().all(|&l| other.contains(l))
    }

    /// 至少共享一条链路
    pub fn intersects(&self, other: &Clique) -> bool {
        self.links.iter().any(|&l| other.contains(l))
    }

    /// 权重：成员链路中最大的需求，决定该时隙的长度
    pub fn weight(&self, demand: &[u32]) -> u32 {
        self.links.iter().map(|l| demand[l.0]).max().unwrap_or(0)
    }

    /// 增益：需求总和减去权重
    pub fn gain(&self, demand: &[u32]) -> u64 {
        let total: u64 = self.links.iter().map(|l| u64::from(demand[l.0])).sum();
        total - u64::from(self.weight(demand))
    }

    /// 全部非空子团（含自身），共 2^k - 1 个。
    ///
    /// 从最后一条链路开始，依次固定“排除”“包含”两种选择递归展开。
    pub fn subsets(&self) -> Vec<Clique> {
        let mut out = Vec::with_capacity((1usize << self.links.len().min(20)).saturating_sub(1));
        let mut chosen = vec![false; self.links.len()];
        collect_subsets(&self.links, self.links.len(), &mut chosen, &mut out);
        out
    }
}

fn collect_subsets(links: &[LinkId], last: usize, chosen: &mut [bool], out: &mut Vec<Clique>) {
    if last == 0 {
        let c = Clique {
            links: links
                .iter()
                .zip(chosen.iter())
                .filter(|(_, keep)| **keep)
                .map(|(l, _)| *l)
                .collect(),
        };
        if !c.is_empty() {
            out.push(c);
        }
        return;
    }
    chosen[last - 1] = false;
    collect_subsets(links, last - 1, chosen, out);
    chosen[last - 1] = true;
    collect_subsets(links, last - 1, chosen, out);
}

impl fmt::Display for Clique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = self
            .links
            .iter()
            .map(|l| l.0.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{{{ids}}}")
    }
}
