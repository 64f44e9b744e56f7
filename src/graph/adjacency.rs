//! 邻接表
//!
//! 每个槽位一行邻接记录，行数始终等于顶点数。

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// 边权度量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeMetric {
    /// 距离
    Distance,
    /// 耗时
    Duration,
}

impl Default for EdgeMetric {
    fn default() -> Self {
        EdgeMetric::Distance
    }
}

/// 邻接记录：源顶点行中的一条带权边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjacent {
    /// 目标槽位
    pub slot: usize,
    /// 距离
    pub distance: f64,
    /// 耗时
    pub duration: f64,
}

impl Adjacent {
    pub fn new(slot: usize, distance: f64, duration: f64) -> Self {
        Self {
            slot,
            distance,
            duration,
        }
    }

    /// 按度量取权重
    pub fn weight(&self, metric: EdgeMetric) -> f64 {
        match metric {
            EdgeMetric::Distance => self.distance,
            EdgeMetric::Duration => self.duration,
        }
    }
}

/// 以标签表示的邻居
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor<L> {
    pub label: L,
    pub distance: f64,
    pub duration: f64,
}

/// 单个顶点的邻接行
pub type AdjacencyRow = SmallVec<[Adjacent; 4]>;

/// 邻接表
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTable {
    rows: Vec<AdjacencyRow>,
}

impl AdjacencyTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// 行数（即顶点数）
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 为新顶点追加空行
    pub fn push_row(&mut self) {
        self.rows.push(AdjacencyRow::new());
    }

    /// 删除槽位
    ///
    /// 删除该行以及所有指向它的记录，再把大于该槽位的目标槽位减一。
    pub fn remove_slot(&mut self, slot: usize) {
        if slot >= self.rows.len() {
            return;
        }
        self.rows.remove(slot);
        for row in &mut self.rows {
            row.retain(|adj| adj.slot != slot);
            for adj in row.iter_mut() {
                if adj.slot > slot {
                    adj.slot -= 1;
                }
            }
        }
    }

    /// 获取邻接行
    pub fn row(&self, slot: usize) -> &[Adjacent] {
        self.rows.get(slot).map(|row| row.as_slice()).unwrap_or(&[])
    }

    /// 遍历所有记录 `(源槽位, 记录)`
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Adjacent)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.iter().map(move |adj| (from, adj)))
    }

    /// 查找 `from -> to` 记录
    pub fn find(&self, from: usize, to: usize) -> Option<&Adjacent> {
        self.row(from).iter().find(|adj| adj.slot == to)
    }

    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.find(from, to).is_some()
    }

    /// 写入 `from -> to` 记录，已存在时原地覆盖权重
    ///
    /// 返回是否新增了记录。
    pub fn upsert(&mut self, from: usize, to: usize, distance: f64, duration: f64) -> bool {
        let row = &mut self.rows[from];
        match row.iter_mut().find(|adj| adj.slot == to) {
            Some(adj) => {
                adj.distance = distance;
                adj.duration = duration;
                false
            }
            None => {
                row.push(Adjacent::new(to, distance, duration));
                true
            }
        }
    }

    /// 更新已存在的 `from -> to` 记录
    pub fn update(&mut self, from: usize, to: usize, distance: f64, duration: f64) -> bool {
        match self.rows[from].iter_mut().find(|adj| adj.slot == to) {
            Some(adj) => {
                adj.distance = distance;
                adj.duration = duration;
                true
            }
            None => false,
        }
    }

    /// 删除 `from -> to` 记录，保留其余记录的插入顺序
    pub fn remove(&mut self, from: usize, to: usize) -> bool {
        let row = &mut self.rows[from];
        match row.iter().position(|adj| adj.slot == to) {
            Some(pos) => {
                row.remove(pos);
                true
            }
            None => false,
        }
    }

    /// 记录总数
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// 入度：线性扫描所有行
    pub fn in_degree(&self, slot: usize) -> usize {
        self.entries().filter(|(_, adj)| adj.slot == slot).count()
    }

    /// 连通性检查
    ///
    /// `symmetric` 为 false 时把有向记录视为无向（弱连通）。
    pub fn is_connected(&self, symmetric: bool) -> bool {
        let n = self.rows.len();
        if n <= 1 {
            return true;
        }

        let mut reverse: Vec<Vec<usize>> = Vec::new();
        if !symmetric {
            reverse = vec![Vec::new(); n];
            for (from, adj) in self.entries() {
                reverse[adj.slot].push(from);
            }
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0);
        let mut seen = 1;

        while let Some(u) = queue.pop_front() {
            let forward = self.row(u).iter().map(|adj| adj.slot);
            let backward = reverse.get(u).into_iter().flatten().copied();
            for w in forward.chain(backward) {
                if !visited[w] {
                    visited[w] = true;
                    seen += 1;
                    queue.push_back(w);
                }
            }
        }

        seen == n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: usize) -> AdjacencyTable {
        let mut table = AdjacencyTable::new();
        for _ in 0..n {
            table.push_row();
        }
        table
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut t = table(3);
        assert!(t.upsert(0, 1, 5.0, 1.0));
        assert!(t.upsert(0, 2, 7.0, 2.0));
        assert!(!t.upsert(0, 1, 3.0, 0.5));

        assert_eq!(t.row(0).len(), 2);
        assert_eq!(t.row(0)[0], Adjacent::new(1, 3.0, 0.5));
        assert_eq!(t.row(0)[1].slot, 2);
    }

    #[test]
    fn test_remove_slot_renumbers_targets() {
        let mut t = table(4);
        t.upsert(0, 1, 1.0, 0.0);
        t.upsert(0, 3, 3.0, 0.0);
        t.upsert(2, 1, 2.0, 0.0);
        t.upsert(3, 2, 4.0, 0.0);

        t.remove_slot(1);

        assert_eq!(t.len(), 3);
        assert_eq!(t.row(0), &[Adjacent::new(2, 3.0, 0.0)]);
        assert!(t.row(1).is_empty());
        assert_eq!(t.row(2), &[Adjacent::new(1, 4.0, 0.0)]);
    }

    #[test]
    fn test_in_degree_and_remove() {
        let mut t = table(3);
        t.upsert(0, 2, 1.0, 0.0);
        t.upsert(1, 2, 1.0, 0.0);
        assert_eq!(t.in_degree(2), 2);

        assert!(t.remove(1, 2));
        assert!(!t.remove(1, 2));
        assert_eq!(t.in_degree(2), 1);
        assert_eq!(t.entry_count(), 1);
    }

    #[test]
    fn test_weak_connectivity() {
        let mut t = table(3);
        t.upsert(1, 0, 1.0, 0.0);
        t.upsert(1, 2, 1.0, 0.0);

        assert!(!t.is_connected(true));
        assert!(t.is_connected(false));
        assert!(table(1).is_connected(true));
    }
}
