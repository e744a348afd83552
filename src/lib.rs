//! agent-event-db - Agent 事件查询层
//!
//! 为上层 API 提供按 workspace 读取 agent 事件的统一入口。
//!
//! # 核心功能
//!
//! - **事件查询**: 按 workspace 过滤，可选 status / agent 等值条件（AND）
//! - **排序**: created_at 倒序，相同时间按 id 倒序
//! - **JSON 负载**: input / output 列反序列化为结构化对象
//!
//! # 错误处理
//!
//! 存储层错误不在本地恢复：记录一条日志后原样返回给调用方。
//!
//! # 示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use agent_event_db::{AgentEventQuery, AgentEventQueryHandler, AgentEventStatus, DbConfig, EventDB};
//!
//! let db = Arc::new(EventDB::connect(DbConfig::from_env())?);
//! let handler = AgentEventQueryHandler::new(db);
//! let drafts = handler.fetch(&AgentEventQuery::new("ws-1").with_status(AgentEventStatus::Draft))?;
//! # Ok::<(), agent_event_db::Error>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod reader;
pub mod schema;
pub mod types;

// Re-exports
pub use config::DbConfig;
pub use db::EventDB;
pub use error::{Error, Result};
pub use filter::{EventColumn, EventFilter};
pub use reader::AgentEventQueryHandler;
pub use types::*;
