//! 顶点标签索引
//!
//! 标签与稠密槽位之间的双向映射。删除顶点时，后续槽位整体前移。

use crate::error::{Error, Result};
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// 顶点标签约束
pub trait Label: Clone + Eq + Hash + fmt::Display {}

impl<T: Clone + Eq + Hash + fmt::Display> Label for T {}

/// 标签 <-> 槽位索引
///
/// 槽位始终落在 `[0, len)` 区间内，按插入顺序分配。
#[derive(Debug, Clone, Serialize)]
#[serde(transparent, bound(serialize = "L: Label + Serialize"))]
pub struct LabelIndex<L> {
    labels: IndexSet<L>,
}

impl<L: Label> LabelIndex<L> {
    /// 创建空索引
    pub fn new() -> Self {
        Self {
            labels: IndexSet::new(),
        }
    }

    /// 插入标签
    ///
    /// 返回 `(槽位, 是否新插入)`。标签已存在时不做任何修改，返回原有槽位。
    pub fn insert(&mut self, label: L) -> (usize, bool) {
        self.labels.insert_full(label)
    }

    /// 标签所在槽位
    pub fn slot_of(&self, label: &L) -> Result<usize> {
        self.labels
            .get_index_of(label)
            .ok_or_else(|| Error::vertex_not_found(label))
    }

    /// 槽位上的标签
    pub fn label_of(&self, slot: usize) -> Result<&L> {
        self.labels.get_index(slot).ok_or(Error::IndexOutOfRange {
            index: slot,
            len: self.labels.len(),
        })
    }

    /// 移除标签，返回其原槽位
    pub fn remove(&mut self, label: &L) -> Result<usize> {
        self.labels
            .shift_remove_full(label)
            .map(|(slot, _)| slot)
            .ok_or_else(|| Error::vertex_not_found(label))
    }

    pub fn contains(&self, label: &L) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 按槽位顺序遍历标签
    pub fn iter(&self) -> impl Iterator<Item = &L> + '_ {
        self.labels.iter()
    }
}

impl<L: Label> Default for LabelIndex<L> {
    fn default() -> Self {
        Self::new()
    }
}
