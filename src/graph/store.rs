//! 有向图与无向图共用的存储
//!
//! 标签索引与邻接表必须一起变更，否则槽位会错位。

use super::adjacency::AdjacencyTable;
use super::label_index::{Label, LabelIndex};
use crate::error::{Error, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct GraphCore<L> {
    pub(crate) index: LabelIndex<L>,
    pub(crate) adjacency: AdjacencyTable,
    /// 每次成功变更加一
    pub(crate) generation: u64,
}

impl<L: Label> GraphCore<L> {
    pub(crate) fn new() -> Self {
        Self {
            index: LabelIndex::new(),
            adjacency: AdjacencyTable::new(),
            generation: 0,
        }
    }

    pub(crate) fn insert_vertex(&mut self, label: L) -> bool {
        let (slot, inserted) = self.index.insert(label);
        if inserted {
            self.adjacency.push_row();
            self.generation += 1;
            debug!(slot, generation = self.generation, "插入顶点");
        }
        inserted
    }

    pub(crate) fn remove_vertex(&mut self, label: &L) -> Result<usize> {
        let slot = self.index.remove(label)?;
        self.adjacency.remove_slot(slot);
        self.generation += 1;
        debug!(vertex = %label, slot, generation = self.generation, "删除顶点");
        Ok(slot)
    }

    /// 解析边的两个端点
    pub(crate) fn endpoints(&self, from: &L, to: &L) -> Result<(usize, usize)> {
        Ok((self.index.slot_of(from)?, self.index.slot_of(to)?))
    }

    /// 解析端点并确认 `from -> to` 记录存在
    pub(crate) fn existing_edge(&self, from: &L, to: &L) -> Result<(usize, usize)> {
        let (u, v) = self.endpoints(from, to)?;
        if !self.adjacency.contains(u, v) {
            return Err(Error::edge_not_found(from, to));
        }
        Ok((u, v))
    }

    pub(crate) fn touch(&mut self) {
        self.generation += 1;
    }
}

/// 距离和耗时都必须是非负的有限数，且小于 `f64::MAX`（Floyd-Warshall 的不可达标记）
pub(crate) fn validate_weights(distance: f64, duration: f64) -> Result<()> {
    let valid = |w: f64| (0.0..f64::MAX).contains(&w);
    if !valid(distance) || !valid(duration) {
        return Err(Error::InvalidWeight { distance, duration });
    }
    Ok(())
}
