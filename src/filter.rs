//! 查询条件构建
//!
//! 累积等值谓词及其绑定参数，最终以 AND 连接成 WHERE 子句。
//! 列名来自固定枚举，值一律走参数绑定。

use rusqlite::ToSql;

use crate::types::AgentEventQuery;

/// 可用于过滤的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    WorkspaceId,
    Status,
    Agent,
}

impl EventColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            EventColumn::WorkspaceId => "workspace_id",
            EventColumn::Status => "status",
            EventColumn::Agent => "agent",
        }
    }
}

/// 等值谓词集合
pub struct EventFilter {
    predicates: Vec<(EventColumn, Box<dyn ToSql>)>,
}

impl EventFilter {
    /// workspace 条件是必须的，所以构建器从它开始
    pub fn for_workspace(workspace_id: &str) -> Self {
        Self {
            predicates: vec![(
                EventColumn::WorkspaceId,
                Box::new(workspace_id.to_string()) as Box<dyn ToSql>,
            )],
        }
    }

    /// 添加等值谓词
    pub fn eq<V: ToSql + 'static>(mut self, column: EventColumn, value: V) -> Self {
        self.predicates.push((column, Box::new(value)));
        self
    }

    /// 从查询描述构建
    pub fn from_query(query: &AgentEventQuery) -> Self {
        let mut filter = Self::for_workspace(&query.workspace_id);
        if let Some(status) = query.status {
            filter = filter.eq(EventColumn::Status, status.as_str());
        }
        if let Some(agent) = &query.agent {
            filter = filter.eq(EventColumn::Agent, agent.clone());
        }
        filter
    }

    /// 谓词数量
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// 生成 `WHERE a = ?1 AND b = ?2 ...`
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }

        let terms: Vec<String> = self
            .predicates
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column.as_sql(), i + 1))
            .collect();

        format!("WHERE {}", terms.join(" AND "))
    }

    /// 绑定参数（与 where_clause 中的占位符顺序一致）
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.predicates.iter().map(|(_, v)| v.as_ref()).collect()
    }
}
