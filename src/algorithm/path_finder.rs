//! 最短路径查询
//!
//! 以标签为单位封装 Dijkstra，供上层报表/可视化调用

use super::dijkstra::{Dijkstra, ShortestPaths};
use crate::error::{Error, Result};
use crate::graph::{EdgeMetric, GraphView};
use serde::Serialize;

/// 路线：最短距离路径及其总距离、总耗时
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<L> {
    /// 路径上的顶点序列
    pub vertices: Vec<L>,
    /// 总距离
    pub distance: f64,
    /// 沿同一路径累加的耗时
    pub duration: f64,
}

impl<L> Route<L> {
    /// 边数
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// 可达目的地
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination<L> {
    pub label: L,
    pub distance: f64,
}

/// 单源可达性报告（不含源点本身）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reachability<L> {
    /// 按距离升序排列，距离相同时保持顶点顺序
    pub reachable: Vec<Destination<L>>,
    pub unreachable: Vec<L>,
}

/// 路径查找器
pub struct PathFinder<'g, G> {
    graph: &'g G,
}

impl<'g, G: GraphView> PathFinder<'g, G> {
    /// 创建路径查找器
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// 以 `origin` 为源运行一次 Dijkstra
    pub fn run(&self, origin: &G::Label, metric: EdgeMetric) -> Result<ShortestPaths> {
        let source = self.graph.slot_of(origin)?;
        Dijkstra::run(self.graph, source, metric)
    }

    /// 到所有顶点的最短距离，与 `vertices()` 顺序对齐
    pub fn single_source_distances(&self, origin: &G::Label) -> Result<Vec<f64>> {
        Ok(self.run(origin, EdgeMetric::Distance)?.distances().to_vec())
    }

    /// 最短距离路径，不可达时为空
    pub fn shortest_path(&self, origin: &G::Label, dest: &G::Label) -> Result<Vec<G::Label>> {
        let target = self.graph.slot_of(dest)?;
        let result = self.run(origin, EdgeMetric::Distance)?;
        self.labels(&result.path_to(target))
    }

    /// 最短距离
    pub fn shortest_cost(&self, origin: &G::Label, dest: &G::Label) -> Result<f64> {
        self.cost(origin, dest, EdgeMetric::Distance)
    }

    /// 最短耗时，独立于距离最优路径单独计算
    pub fn shortest_duration(&self, origin: &G::Label, dest: &G::Label) -> Result<f64> {
        self.cost(origin, dest, EdgeMetric::Duration)
    }

    pub fn is_reachable(&self, origin: &G::Label, dest: &G::Label) -> Result<bool> {
        let target = self.graph.slot_of(dest)?;
        Ok(self.run(origin, EdgeMetric::Distance)?.is_reachable(target))
    }

    /// 最短距离路线，附带沿该路线累加的耗时
    pub fn route(&self, origin: &G::Label, dest: &G::Label) -> Result<Option<Route<G::Label>>> {
        let target = self.graph.slot_of(dest)?;
        let result = self.run(origin, EdgeMetric::Distance)?;
        let slots = result.path_to(target);
        if slots.is_empty() {
            return Ok(None);
        }

        Ok(Some(Route {
            vertices: self.labels(&slots)?,
            distance: result.cost_to(target)?,
            duration: self.path_duration(&slots)?,
        }))
    }

    /// 从 `origin` 出发的可达与不可达顶点
    pub fn reachable_from(&self, origin: &G::Label) -> Result<Reachability<G::Label>> {
        let result = self.run(origin, EdgeMetric::Distance)?;
        let mut reachable = Vec::new();
        let mut unreachable = Vec::new();

        for (slot, &distance) in result.distances().iter().enumerate() {
            if slot == result.source() {
                continue;
            }
            let label = self.graph.vertex_at(slot)?.clone();
            if result.is_reachable(slot) {
                reachable.push(Destination { label, distance });
            } else {
                unreachable.push(label);
            }
        }
        reachable.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        Ok(Reachability {
            reachable,
            unreachable,
        })
    }

    /// 沿槽位序列累加耗时，相邻两点之间必须有边
    fn path_duration(&self, slots: &[usize]) -> Result<f64> {
        slots
            .windows(2)
            .map(|pair| match self.graph.adjacency().find(pair[0], pair[1]) {
                Some(adj) => Ok(adj.duration),
                None => Err(Error::edge_not_found(
                    self.graph.vertex_at(pair[0])?,
                    self.graph.vertex_at(pair[1])?,
                )),
            })
            .sum()
    }

    fn cost(&self, origin: &G::Label, dest: &G::Label, metric: EdgeMetric) -> Result<f64> {
        let target = self.graph.slot_of(dest)?;
        self.run(origin, metric)?.cost_to(target)
    }

    fn labels(&self, slots: &[usize]) -> Result<Vec<G::Label>> {
        slots
            .iter()
            .map(|&slot| self.graph.vertex_at(slot).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::INF;
    use crate::graph::{DiWeightedGraph, WeightedGraph};

    fn create_test_graph() -> WeightedGraph<&'static str> {
        // A - B - C 以及孤立顶点 Z
        let mut g = WeightedGraph::with_vertices(["A", "B", "C", "Z"]);
        g.insert_edge(&"A", &"B", 1.0, 0.5).unwrap();
        g.insert_edge(&"B", &"C", 1.0, 0.5).unwrap();
        g.insert_edge(&"A", &"C", 5.0, 0.75).unwrap();
        g
    }

    #[test]
    fn test_shortest_path() {
        let g = create_test_graph();
        let finder = PathFinder::new(&g);

        assert_eq!(finder.single_source_distances(&"A").unwrap(), vec![0.0, 1.0, 2.0, INF]);
        assert_eq!(finder.shortest_path(&"A", &"C").unwrap(), vec!["A", "B", "C"]);
        assert_eq!(finder.shortest_cost(&"A", &"C").unwrap(), 2.0);
        assert_eq!(finder.shortest_duration(&"A", &"C").unwrap(), 0.75);
        assert_eq!(finder.shortest_path(&"B", &"B").unwrap(), vec!["B"]);
    }

    #[test]
    fn test_unreachable() {
        let g = create_test_graph();
        let finder = g.path_finder();

        assert!(finder.shortest_path(&"A", &"Z").unwrap().is_empty());
        assert_eq!(finder.shortest_cost(&"A", &"Z").unwrap(), INF);
        assert!(!finder.is_reachable(&"A", &"Z").unwrap());
        assert!(finder.route(&"A", &"Z").unwrap().is_none());
    }

    #[test]
    fn test_route_sums_duration_along_distance_path() {
        let g = create_test_graph();
        let route = g.path_finder().route(&"A", &"C").unwrap().unwrap();

        assert_eq!(route.vertices, vec!["A", "B", "C"]);
        assert_eq!(route.distance, 2.0);
        assert_eq!(route.duration, 1.0);
        assert_eq!(route.hops(), 2);
    }

    #[test]
    fn test_path_duration_requires_every_hop() {
        let g = create_test_graph();
        let finder = g.path_finder();

        assert_eq!(finder.path_duration(&[0, 1, 2]).unwrap(), 1.0);
        assert_eq!(finder.path_duration(&[3]).unwrap(), 0.0);
        assert!(matches!(
            finder.path_duration(&[0, 3]),
            Err(Error::EdgeNotFound { ref from, ref to }) if from == "A" && to == "Z"
        ));
    }

    #[test]
    fn test_reachable_from() {
        let g = create_test_graph();
        let report = g.path_finder().reachable_from(&"C").unwrap();

        assert_eq!(
            report.reachable,
            vec![
                Destination { label: "B", distance: 1.0 },
                Destination { label: "A", distance: 2.0 },
            ]
        );
        assert_eq!(report.unreachable, vec!["Z"]);
    }

    #[test]
    fn test_directed_paths_follow_edge_direction() {
        let mut g = DiWeightedGraph::with_vertices(["A", "B"]);
        g.insert_edge(&"A", &"B", 4.0, 1.0).unwrap();
        let finder = g.path_finder();

        assert_eq!(finder.shortest_path(&"A", &"B").unwrap(), vec!["A", "B"]);
        assert!(finder.shortest_path(&"B", &"A").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_label() {
        let g = create_test_graph();
        let finder = g.path_finder();

        assert!(matches!(
            finder.shortest_path(&"A", &"Q"),
            Err(Error::VertexNotFound(_))
        ));
        assert!(matches!(
            finder.single_source_distances(&"Q"),
            Err(Error::VertexNotFound(_))
        ));
    }
}
