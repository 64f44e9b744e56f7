//! 全源最短路径
//!
//! Floyd-Warshall，O(V³)。结果是对图的一次快照，之后图的变更不会反映到结果中，
//! 需通过 [`AllPairs::is_stale`] 判断是否需要重建。

use crate::error::{Error, Result};
use crate::graph::{GraphView, Label, LabelIndex};
use serde::Serialize;
use tracing::{debug, trace};

/// 不可达距离，任何合法边权都严格小于它
pub const INFINITE: f64 = f64::MAX;

/// 全源最短路径结果
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "L: Label + Serialize"))]
pub struct AllPairs<L> {
    labels: LabelIndex<L>,
    /// `distances[i][j]`：i 到 j 的最短距离
    distances: Vec<Vec<f64>>,
    /// `predecessors[i][j]`：i 到 j 最短路径上 j 的前一个顶点
    predecessors: Vec<Vec<Option<usize>>>,
    generation: u64,
}

/// Floyd-Warshall 算法
pub struct FloydWarshall;

impl FloydWarshall {
    /// 对当前图做快照并计算
    pub fn build<G: GraphView>(graph: &G) -> AllPairs<G::Label> {
        let labels = graph.label_index().clone();
        let n = labels.len();

        let mut distances = vec![vec![INFINITE; n]; n];
        let mut predecessors = vec![vec![None; n]; n];
        for (from, adj) in graph.adjacency().entries() {
            distances[from][adj.slot] = adj.distance;
            predecessors[from][adj.slot] = Some(from);
        }
        for i in 0..n {
            distances[i][i] = 0.0;
            predecessors[i][i] = None;
        }

        for k in 0..n {
            for i in 0..n {
                let via_k = distances[i][k];
                if via_k >= INFINITE {
                    continue;
                }
                for j in 0..n {
                    let tail = distances[k][j];
                    if tail >= INFINITE {
                        continue;
                    }
                    let candidate = via_k + tail;
                    if candidate < distances[i][j] {
                        distances[i][j] = candidate;
                        let pred = predecessors[k][j];
                        predecessors[i][j] = pred;
                    }
                }
            }
            trace!(k, "Floyd-Warshall 阶段完成");
        }

        debug!(vertices = n, generation = graph.generation(), "Floyd-Warshall 完成");

        AllPairs {
            labels,
            distances,
            predecessors,
            generation: graph.generation(),
        }
    }
}

impl<L: Label> AllPairs<L> {
    /// 顶点数
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 快照时的顶点顺序
    pub fn labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.labels.iter()
    }

    pub fn slot_of(&self, label: &L) -> Result<usize> {
        self.labels.slot_of(label)
    }

    /// 原始矩阵项，不可达为 [`INFINITE`]
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.distances[i][j])
    }

    pub fn distance_between(&self, origin: &L, dest: &L) -> Result<f64> {
        self.distance(self.slot_of(origin)?, self.slot_of(dest)?)
    }

    pub fn predecessor(&self, i: usize, j: usize) -> Result<Option<usize>> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.predecessors[i][j])
    }

    pub fn is_reachable(&self, i: usize, j: usize) -> Result<bool> {
        Ok(self.distance(i, j)? < INFINITE)
    }

    pub fn distances(&self) -> &[Vec<f64>] {
        &self.distances
    }

    pub fn predecessors(&self) -> &[Vec<Option<usize>>] {
        &self.predecessors
    }

    /// 槽位路径，不可达时为空，`i == j` 时只含一个顶点
    pub fn slot_path(&self, i: usize, j: usize) -> Result<Vec<usize>> {
        if !self.is_reachable(i, j)? {
            return Ok(Vec::new());
        }

        let mut path = vec![j];
        let mut current = j;
        while current != i {
            match self.predecessors[i][current] {
                Some(prev) if path.len() <= self.len() => {
                    path.push(prev);
                    current = prev;
                }
                _ => return Ok(Vec::new()),
            }
        }
        path.reverse();
        Ok(path)
    }

    /// 从 `origin` 到 `dest` 的完整路径（含两端）
    pub fn path(&self, origin: &L, dest: &L) -> Result<Vec<L>> {
        let slots = self.slot_path(self.slot_of(origin)?, self.slot_of(dest)?)?;
        slots
            .into_iter()
            .map(|slot| self.labels.label_of(slot).cloned())
            .collect()
    }

    /// 快照时图的变更代数
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 图在快照之后是否已被修改
    pub fn is_stale<G: GraphView>(&self, graph: &G) -> bool {
        graph.generation() != self.generation
    }

    fn check(&self, slot: usize) -> Result<()> {
        if slot >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: slot,
                len: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DiWeightedGraph, WeightedGraph};

    fn create_test_graph() -> WeightedGraph<&'static str> {
        let mut g = WeightedGraph::with_vertices(["A", "B", "C", "D"]);
        g.insert_edge(&"A", &"B", 1.0, 0.0).unwrap();
        g.insert_edge(&"B", &"C", 1.0, 0.0).unwrap();
        g.insert_edge(&"A", &"C", 5.0, 0.0).unwrap();
        g.insert_edge(&"C", &"D", 2.0, 0.0).unwrap();
        g
    }

    #[test]
    fn test_distances_and_paths() {
        let g = create_test_graph();
        let all = FloydWarshall::build(&g);

        assert_eq!(all.distance(0, 2).unwrap(), 2.0);
        assert_eq!(all.distance(0, 3).unwrap(), 4.0);
        assert_eq!(all.distance(3, 0).unwrap(), 4.0);
        assert_eq!(all.path(&"A", &"D").unwrap(), vec!["A", "B", "C", "D"]);
        assert_eq!(all.path(&"D", &"A").unwrap(), vec!["D", "C", "B", "A"]);
        assert_eq!(all.predecessor(0, 3).unwrap(), Some(2));
    }

    #[test]
    fn test_diagonal() {
        let g = create_test_graph();
        let all = g.build_all_pairs();

        for i in 0..all.len() {
            assert_eq!(all.distance(i, i).unwrap(), 0.0);
            assert_eq!(all.predecessor(i, i).unwrap(), None);
        }
        assert_eq!(all.path(&"B", &"B").unwrap(), vec!["B"]);
    }

    #[test]
    fn test_unreachable_is_infinite() {
        let mut g = DiWeightedGraph::with_vertices(["A", "B", "Z"]);
        g.insert_edge(&"A", &"B", 3.0, 0.0).unwrap();
        let all = g.build_all_pairs();

        assert_eq!(all.distance(1, 0).unwrap(), INFINITE);
        assert_eq!(all.distance_between(&"A", &"Z").unwrap(), INFINITE);
        assert!(all.path(&"B", &"A").unwrap().is_empty());
        assert!(!all.is_reachable(0, 2).unwrap());
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let mut g = create_test_graph();
        let all = g.build_all_pairs();
        assert!(!all.is_stale(&g));

        g.remove_vertex(&"B").unwrap();

        assert!(all.is_stale(&g));
        assert_eq!(all.len(), 4);
        assert_eq!(all.path(&"A", &"C").unwrap(), vec!["A", "B", "C"]);
        assert_eq!(g.build_all_pairs().path(&"A", &"C").unwrap(), vec!["A", "C"]);
    }

    #[test]
    fn test_large_weights_stay_reachable() {
        let mut g = WeightedGraph::with_vertices(["A", "B", "C"]);
        g.insert_edge(&"A", &"B", 6e8, 0.0).unwrap();
        g.insert_edge(&"B", &"C", 6e8, 0.0).unwrap();
        let all = g.build_all_pairs();

        assert_eq!(all.distance(0, 2).unwrap(), 1.2e9);
        assert!(all.is_reachable(0, 2).unwrap());
        assert_eq!(all.path(&"A", &"C").unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_bad_slot_and_label() {
        let g = create_test_graph();
        let all = g.build_all_pairs();

        assert!(matches!(
            all.distance(0, 9),
            Err(Error::IndexOutOfRange { index: 9, len: 4 })
        ));
        assert!(matches!(all.path(&"A", &"Q"), Err(Error::VertexNotFound(_))));
    }

    #[test]
    fn test_empty_graph() {
        let g: WeightedGraph<String> = WeightedGraph::new();
        let all = g.build_all_pairs();
        assert!(all.is_empty());
        assert!(all.distances().is_empty());
    }
}
