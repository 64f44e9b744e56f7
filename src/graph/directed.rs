//! 有向带权图
//!
//! 每条边只存一条 `u -> v` 记录。不维护反向索引，入度通过线性扫描得到。

use super::adjacency::AdjacencyTable;
use super::label_index::{Label, LabelIndex};
use super::store::{validate_weights, GraphCore};
use super::view::GraphView;
use crate::error::Result;
use tracing::debug;

/// 有向带权图
#[derive(Debug, Clone)]
pub struct DiWeightedGraph<L = String> {
    core: GraphCore<L>,
}

impl<L: Label> DiWeightedGraph<L> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            core: GraphCore::new(),
        }
    }

    /// 以给定顶点创建图
    pub fn with_vertices<I: IntoIterator<Item = L>>(vertices: I) -> Self {
        let mut graph = Self::new();
        for label in vertices {
            graph.insert_vertex(label);
        }
        graph
    }

    // ==================== 顶点操作 ====================

    pub fn insert_vertex(&mut self, label: L) -> bool {
        self.core.insert_vertex(label)
    }

    /// 删除顶点及所有出边、入边
    pub fn remove_vertex(&mut self, label: &L) -> Result<()> {
        self.core.remove_vertex(label).map(|_| ())
    }

    // ==================== 边操作 ====================

    /// 插入 `from -> to`，已存在时覆盖权重
    pub fn insert_edge(&mut self, from: &L, to: &L, distance: f64, duration: f64) -> Result<()> {
        let (u, v) = self.core.endpoints(from, to)?;
        validate_weights(distance, duration)?;

        self.core.adjacency.upsert(u, v, distance, duration);
        self.core.touch();
        debug!(from = %from, to = %to, distance, duration, "插入有向边");
        Ok(())
    }

    /// 插入零权重边
    pub fn connect(&mut self, from: &L, to: &L) -> Result<()> {
        self.insert_edge(from, to, 0.0, 0.0)
    }

    /// 只删除 `from -> to`，反向边保持不变
    pub fn remove_edge(&mut self, from: &L, to: &L) -> Result<()> {
        let (u, v) = self.core.existing_edge(from, to)?;

        self.core.adjacency.remove(u, v);
        self.core.touch();
        debug!(from = %from, to = %to, "删除有向边");
        Ok(())
    }

    pub fn update_edge_weight(
        &mut self,
        from: &L,
        to: &L,
        distance: f64,
        duration: f64,
    ) -> Result<()> {
        let (u, v) = self.core.existing_edge(from, to)?;
        validate_weights(distance, duration)?;

        self.core.adjacency.update(u, v, distance, duration);
        self.core.touch();
        debug!(from = %from, to = %to, distance, duration, "更新有向边权重");
        Ok(())
    }

    // ==================== 度 ====================

    /// 出度
    pub fn out_degree(&self, label: &L) -> Result<usize> {
        let slot = self.core.index.slot_of(label)?;
        Ok(self.core.adjacency.row(slot).len())
    }

    /// 入度
    pub fn in_degree(&self, label: &L) -> Result<usize> {
        let slot = self.core.index.slot_of(label)?;
        Ok(self.core.adjacency.in_degree(slot))
    }
}

impl<L: Label> Default for DiWeightedGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> GraphView for DiWeightedGraph<L> {
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
        true
    }

    fn edge_count(&self) -> usize {
        self.core.adjacency.entry_count()
    }

    fn total_weight(&self) -> f64 {
        self.core
            .adjacency
            .entries()
            .map(|(_, adj)| adj.distance)
            .sum()
    }

    /// 出度 + 入度
    fn degree(&self, label: &L) -> Result<usize> {
        Ok(self.out_degree(label)? + self.in_degree(label)?)
    }
}
