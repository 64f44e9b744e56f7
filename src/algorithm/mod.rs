//! 图算法模块
//!
//! 包含单源最短路径（数组版 Dijkstra）和全源最短路径（Floyd-Warshall）

mod dijkstra;
mod floyd_warshall;
mod path_finder;

pub use dijkstra::{Dijkstra, ShortestPaths, INF};
pub use floyd_warshall::{AllPairs, FloydWarshall, INFINITE};
pub use path_finder::{Destination, PathFinder, Reachability, Route};
