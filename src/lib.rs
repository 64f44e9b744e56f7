//! RouteGraph - 动态带权图与最短路径引擎
//!
//! 面向路网场景的内存图库，支持：
//! - 有向/无向带权图，边同时携带距离与时间两种权重
//! - 标签到稠密槽位的映射，删除顶点后槽位自动压缩
//! - Dijkstra 单源最短路径与 Floyd-Warshall 全源最短路径
//! - 交互式命令行

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;

// 重导出常用类型
pub use algorithm::{AllPairs, Dijkstra, FloydWarshall, PathFinder, Route, ShortestPaths};
pub use error::{Error, Result};
pub use graph::{DiWeightedGraph, EdgeMetric, GraphView, Label, LabelIndex, WeightedGraph};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
