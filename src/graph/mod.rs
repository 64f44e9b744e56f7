//! 图核心模块
//!
//! 定义标签索引、邻接表以及有向/无向带权图

mod adjacency;
mod directed;
mod label_index;
mod store;
mod view;
mod weighted;

pub use adjacency::{Adjacent, AdjacencyRow, AdjacencyTable, EdgeMetric, Neighbor};
pub use directed::DiWeightedGraph;
pub use label_index::{Label, LabelIndex};
pub use view::GraphView;
pub use weighted::WeightedGraph;
