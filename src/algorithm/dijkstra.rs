//! 单源最短路径
//!
//! 数组版 Dijkstra：每轮线性扫描未访问顶点取最小距离，复杂度 O(V² + E)。
//! 距离相同时取槽位最小者，保证路径可复现。

use crate::error::{Error, Result};
use crate::graph::{EdgeMetric, GraphView};
use serde::Serialize;
use tracing::{debug, trace};

/// 不可达距离
pub const INF: f64 = f64::INFINITY;

/// 单源最短路径结果
///
/// 只对计算时的源点和图的变更代数有效。
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPaths {
    source: usize,
    metric: EdgeMetric,
    dist: Vec<f64>,
    parent: Vec<Option<usize>>,
    /// 顶点被确定最短距离的先后顺序
    settle_order: Vec<usize>,
    generation: u64,
}

impl ShortestPaths {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn metric(&self) -> EdgeMetric {
        self.metric
    }

    /// 与顶点顺序对齐的距离数组
    pub fn distances(&self) -> &[f64] {
        &self.dist
    }

    /// 到 `target` 的最短代价，不可达为 [`INF`]
    pub fn cost_to(&self, target: usize) -> Result<f64> {
        self.dist.get(target).copied().ok_or(Error::IndexOutOfRange {
            index: target,
            len: self.dist.len(),
        })
    }

    /// 最短路径树中的父节点
    pub fn parent(&self, slot: usize) -> Option<usize> {
        self.parent.get(slot).copied().flatten()
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.dist.get(target).map_or(false, |d| *d < INF)
    }

    /// 从源点到 `target` 的槽位序列，不可达时为空
    pub fn path_to(&self, target: usize) -> Vec<usize> {
        if !self.is_reachable(target) {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            match self.parent[current] {
                Some(prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    pub fn settle_order(&self) -> &[usize] {
        &self.settle_order
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 图在计算之后是否已被修改
    pub fn is_stale<G: GraphView>(&self, graph: &G) -> bool {
        graph.generation() != self.generation
    }
}

/// 数组版 Dijkstra
pub struct Dijkstra;

impl Dijkstra {
    /// 从 `source` 槽位出发，按 `metric` 计算到所有顶点的最短路径
    pub fn run<G: GraphView>(graph: &G, source: usize, metric: EdgeMetric) -> Result<ShortestPaths> {
        let n = graph.vertex_count();
        if source >= n {
            return Err(Error::IndexOutOfRange {
                index: source,
                len: n,
            });
        }

        let mut dist = vec![INF; n];
        let mut parent = vec![None; n];
        let mut visited = vec![false; n];
        let mut settle_order = Vec::with_capacity(n);
        dist[source] = 0.0;

        for _ in 0..n {
            let Some(u) = Self::closest_unvisited(&dist, &visited) else {
                break;
            };
            visited[u] = true;
            settle_order.push(u);
            trace!(slot = u, distance = dist[u], "确定顶点");

            for adj in graph.row(u) {
                let candidate = dist[u] + adj.weight(metric);
                if candidate < dist[adj.slot] {
                    dist[adj.slot] = candidate;
                    parent[adj.slot] = Some(u);
                }
            }
        }

        debug!(
            source,
            ?metric,
            reached = settle_order.len(),
            total = n,
            "Dijkstra 完成"
        );

        Ok(ShortestPaths {
            source,
            metric,
            dist,
            parent,
            settle_order,
            generation: graph.generation(),
        })
    }

    /// 未访问顶点中距离最小者，距离相同取槽位最小；全部不可达时返回 None
    fn closest_unvisited(dist: &[f64], visited: &[bool]) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_dist = INF;
        for (slot, (&d, &done)) in dist.iter().zip(visited).enumerate() {
            if !done && d < best_dist {
                best = Some(slot);
                best_dist = d;
            }
        }
        best
    }
}
