//! Agent 事件查询
//!
//! 按 workspace 拉取事件，可选按 status / agent 过滤，按创建时间倒序返回。
//! 存储层错误记录一条日志后原样返回，不重试、不返回部分结果。

use std::sync::Arc;

use rusqlite::types::Type;
use rusqlite::Row;

use crate::db::EventDB;
use crate::error::{Error, Result};
use crate::filter::EventFilter;
use crate::schema::EVENT_COLUMNS;
use crate::types::{AgentEvent, AgentEventQuery, AgentEventStatus, JsonObject};

/// Agent 事件查询处理器
#[derive(Clone)]
pub struct AgentEventQueryHandler {
    db: Arc<EventDB>,
}

impl AgentEventQueryHandler {
    pub fn new(db: Arc<EventDB>) -> Self {
        Self { db }
    }

    /// 查询事件
    ///
    /// created_at 相同的事件按 id 倒序（后插入的在前）。
    pub fn fetch(&self, query: &AgentEventQuery) -> Result<Vec<AgentEvent>> {
        self.query_events(query).map_err(|e| {
            tracing::error!(
                workspace_id = %query.workspace_id,
                status = ?query.status,
                agent = ?query.agent,
                "获取 agent 事件失败: {}",
                e
            );
            e
        })
    }

    /// 异步查询：在 blocking 线程上执行 `fetch`
    pub async fn fetch_async(&self, query: AgentEventQuery) -> Result<Vec<AgentEvent>> {
        let handler = self.clone();
        tokio::task::spawn_blocking(move || handler.fetch(&query))
            .await
            .map_err(join_failure)?
    }

    fn query_events(&self, query: &AgentEventQuery) -> Result<Vec<AgentEvent>> {
        let filter = EventFilter::from_query(query);
        let sql = format!(
            "SELECT {} FROM agent_events {} ORDER BY created_at DESC, id DESC",
            EVENT_COLUMNS,
            filter.where_clause()
        );
        tracing::debug!("agent 事件查询: {}", sql);

        let conn = self.db.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(filter.params().as_slice(), map_event_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

fn join_failure(e: tokio::task::JoinError) -> Error {
    tracing::error!("agent 事件查询任务中断: {}", e);
    Error::Other(anyhow::Error::new(e).context("查询任务中断"))
}

/// 行映射，列顺序见 `schema::EVENT_COLUMNS`
fn map_event_row(row: &Row<'_>) -> rusqlite::Result<AgentEvent> {
    let input_str: String = row.get(4)?;
    let output_str: Option<String> = row.get(5)?;
    let status_str: String = row.get(6)?;

    Ok(AgentEvent {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        agent: row.get(2)?,
        action: row.get(3)?,
        input: parse_json_object(4, &input_str)?,
        output: output_str
            .map(|s| parse_json_object(5, &s))
            .transpose()?,
        status: status_str
            .parse::<AgentEventStatus>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        created_at: row.get(7)?,
    })
}

fn parse_json_object(idx: usize, raw: &str) -> rusqlite::Result<JsonObject> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
