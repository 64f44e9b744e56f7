//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("无效的权重: 距离 {distance}, 时间 {duration}（必须为非负数）")]
    InvalidWeight { distance: f64, duration: f64 },

    #[error("索引越界: {index}（顶点数 {len}）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl Error {
    pub(crate) fn vertex_not_found(label: impl std::fmt::Display) -> Self {
        Error::VertexNotFound(label.to_string())
    }

    pub(crate) fn edge_not_found(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Error::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
