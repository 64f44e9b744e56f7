//! 图查询接口
//!
//! 有向图和无向图共享同一套查询契约，算法通过泛型静态分发读取。

use super::adjacency::{Adjacent, AdjacencyTable, Neighbor};
use super::label_index::{Label, LabelIndex};
use crate::algorithm::{AllPairs, FloydWarshall, PathFinder};
use crate::error::{Error, Result};

pub trait GraphView {
    type Label: Label;

    /// 标签索引
    fn label_index(&self) -> &LabelIndex<Self::Label>;

    /// 邻接表
    fn adjacency(&self) -> &AdjacencyTable;

    /// 变更代数，每次成功变更后递增
    fn generation(&self) -> u64;

    fn is_directed(&self) -> bool;

    /// 边数
    fn edge_count(&self) -> usize;

    /// 所有边的距离之和
    fn total_weight(&self) -> f64;

    /// 顶点的度
    fn degree(&self, label: &Self::Label) -> Result<usize>;

    /// 是否连通（有向图按弱连通判断）
    fn is_connected(&self) -> bool {
        self.adjacency().is_connected(!self.is_directed())
    }

    fn vertex_count(&self) -> usize {
        self.label_index().len()
    }

    /// 按槽位顺序返回所有顶点
    fn vertices(&self) -> Vec<Self::Label> {
        self.label_index().iter().cloned().collect()
    }

    fn contains_vertex(&self, label: &Self::Label) -> bool {
        self.label_index().contains(label)
    }

    fn slot_of(&self, label: &Self::Label) -> Result<usize> {
        self.label_index().slot_of(label)
    }

    fn vertex_at(&self, slot: usize) -> Result<&Self::Label> {
        self.label_index().label_of(slot)
    }

    /// 槽位的邻接行
    fn row(&self, slot: usize) -> &[Adjacent] {
        self.adjacency().row(slot)
    }

    fn has_edge(&self, from: &Self::Label, to: &Self::Label) -> Result<bool> {
        let u = self.slot_of(from)?;
        let v = self.slot_of(to)?;
        Ok(self.adjacency().contains(u, v))
    }

    /// 获取 `from -> to` 的邻接记录
    fn edge(&self, from: &Self::Label, to: &Self::Label) -> Result<Adjacent> {
        let u = self.slot_of(from)?;
        let v = self.slot_of(to)?;
        self.adjacency()
            .find(u, v)
            .copied()
            .ok_or_else(|| Error::edge_not_found(from, to))
    }

    fn edge_distance(&self, from: &Self::Label, to: &Self::Label) -> Result<f64> {
        self.edge(from, to).map(|adj| adj.distance)
    }

    fn edge_duration(&self, from: &Self::Label, to: &Self::Label) -> Result<f64> {
        self.edge(from, to).map(|adj| adj.duration)
    }

    /// 带权邻居，保持插入顺序
    fn neighbors(&self, label: &Self::Label) -> Result<Vec<Neighbor<Self::Label>>> {
        let slot = self.slot_of(label)?;
        self.row(slot)
            .iter()
            .map(|adj| {
                Ok(Neighbor {
                    label: self.vertex_at(adj.slot)?.clone(),
                    distance: adj.distance,
                    duration: adj.duration,
                })
            })
            .collect()
    }

    fn neighbor_labels(&self, label: &Self::Label) -> Result<Vec<Self::Label>> {
        let slot = self.slot_of(label)?;
        self.row(slot)
            .iter()
            .map(|adj| self.vertex_at(adj.slot).cloned())
            .collect()
    }

    /// 以当前图为快照计算全源最短路径
    fn build_all_pairs(&self) -> AllPairs<Self::Label>
    where
        Self: Sized,
    {
        FloydWarshall::build(self)
    }

    /// 单源最短路径查询入口
    fn path_finder(&self) -> PathFinder<'_, Self>
    where
        Self: Sized,
    {
        PathFinder::new(self)
    }
}
