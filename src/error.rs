//! 错误类型定义

use thiserror::Error;

/// 库错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 数据库错误（连接、SQL、行映射失败均归入此类）
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 非法的事件状态
    #[error("非法的事件状态: {0}")]
    InvalidStatus(String),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;
