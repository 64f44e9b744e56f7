//! 无向带权图
//!
//! 每条无向边存为两条镜像记录 `u -> v` 与 `v -> u`，权重始终一致。

use super::adjacency::AdjacencyTable;
use super::label_index::{Label, LabelIndex};
use super::store::{validate_weights, GraphCore};
use super::view::GraphView;
use crate::error::Result;
use tracing::debug;

/// 无向带权图
#[derive(Debug, Clone)]
pub struct WeightedGraph<L = String> {
    core: GraphCore<L>,
}

impl<L: Label> WeightedGraph<L> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            core: GraphCore::new(),
        }
    }

    /// 以给定顶点创建图，重复标签只保留第一个
    pub fn with_vertices<I: IntoIterator<Item = L>>(vertices: I) -> Self {
        let mut graph = Self::new();
        for label in vertices {
            graph.insert_vertex(label);
        }
        graph
    }

    // ==================== 顶点操作 ====================

    /// 插入顶点，标签已存在时不做任何事并返回 false
    pub fn insert_vertex(&mut self, label: L) -> bool {
        self.core.insert_vertex(label)
    }

    /// 删除顶点及其所有关联边
    pub fn remove_vertex(&mut self, label: &L) -> Result<()> {
        self.core.remove_vertex(label).map(|_| ())
    }

    // ==================== 边操作 ====================

    /// 插入边，已存在时覆盖权重
    pub fn insert_edge(&mut self, from: &L, to: &L, distance: f64, duration: f64) -> Result<()> {
        let (u, v) = self.core.endpoints(from, to)?;
        validate_weights(distance, duration)?;

        let adjacency = &mut self.core.adjacency;
        adjacency.upsert(u, v, distance, duration);
        if u != v {
            adjacency.upsert(v, u, distance, duration);
        }
        self.core.touch();
        debug!(from = %from, to = %to, distance, duration, "插入无向边");
        Ok(())
    }

    /// 插入零权重边
    pub fn connect(&mut self, from: &L, to: &L) -> Result<()> {
        self.insert_edge(from, to, 0.0, 0.0)
    }

    /// 删除边（两条镜像记录）
    pub fn remove_edge(&mut self, from: &L, to: &L) -> Result<()> {
        let (u, v) = self.core.existing_edge(from, to)?;

        let adjacency = &mut self.core.adjacency;
        adjacency.remove(u, v);
        if u != v {
            adjacency.remove(v, u);
        }
        self.core.touch();
        debug!(from = %from, to = %to, "删除无向边");
        Ok(())
    }

    /// 更新边权重（两条镜像记录同时更新）
    pub fn update_edge_weight(
        &mut self,
        from: &L,
        to: &L,
        distance: f64,
        duration: f64,
    ) -> Result<()> {
        let (u, v) = self.core.existing_edge(from, to)?;
        validate_weights(distance, duration)?;

        let adjacency = &mut self.core.adjacency;
        adjacency.update(u, v, distance, duration);
        if u != v {
            adjacency.update(v, u, distance, duration);
        }
        self.core.touch();
        debug!(from = %from, to = %to, distance, duration, "更新无向边权重");
        Ok(())
    }
}

impl<L: Label> Default for WeightedGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> GraphView for WeightedGraph<L> {
    type Label = L;

    fn label_index(&self) -> &LabelIndex<L> {
        &self.core.index
    }

    fn adjacency(&self) -> &AdjacencyTable {
        &self.core.adjacency
    }

    fn generation(&self) -> u64 {
        self.core.generation
    }

    fn is_directed(&self) -> bool {
        false
    }

    /// 每条无向边只计一次，自环也只计一次
    fn edge_count(&self) -> usize {
        self.core
            .adjacency
            .entries()
            .filter(|(from, adj)| adj.slot >= *from)
            .count()
    }

    fn total_weight(&self) -> f64 {
        self.core
            .adjacency
            .entries()
            .filter(|(from, adj)| adj.slot >= *from)
            .map(|(_, adj)| adj.distance)
            .sum()
    }

    /// 邻接记录数，每个不同邻居一条
    fn degree(&self, label: &L) -> Result<usize> {
        let slot = self.core.index.slot_of(label)?;
        Ok(self.core.adjacency.row(slot).len())
    }
}
