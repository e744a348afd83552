//! 数据类型定义

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 结构化 JSON 负载 (input / output)
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// 事件生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentEventStatus {
    Draft,
    Executed,
    Error,
}

impl AgentEventStatus {
    /// 存储层使用的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentEventStatus::Draft => "draft",
            AgentEventStatus::Executed => "executed",
            AgentEventStatus::Error => "error",
        }
    }
}

impl FromStr for AgentEventStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(AgentEventStatus::Draft),
            "executed" => Ok(AgentEventStatus::Executed),
            "error" => Ok(AgentEventStatus::Error),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for AgentEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent 事件（存储层的只读投影）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    pub id: i64,
    pub workspace_id: String,
    pub agent: String,
    pub action: String,
    pub input: JsonObject,
    pub output: Option<JsonObject>,
    pub status: AgentEventStatus,
    /// 毫秒时间戳
    pub created_at: i64,
}

impl AgentEvent {
    /// created_at 转为 UTC 时间
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}

/// 查询描述
///
/// `workspace_id` 必填；`status` / `agent` 为可选的等值过滤条件，多个条件之间是 AND。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEventQuery {
    pub workspace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentEventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl AgentEventQuery {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            status: None,
            agent: None,
        }
    }

    pub fn with_status(mut self, status: AgentEventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "Draft".parse::<AgentEventStatus>().unwrap(),
            AgentEventStatus::Draft
        );
        assert_eq!(
            "EXECUTED".parse::<AgentEventStatus>().unwrap(),
            AgentEventStatus::Executed
        );
        assert!(matches!(
            "pending".parse::<AgentEventStatus>(),
            Err(Error::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&AgentEventStatus::Error).unwrap();
        assert_eq!(json, "\"error\"");
        assert_eq!(AgentEventStatus::Executed.to_string(), "executed");
    }

    #[test]
    fn test_query_builder() {
        let query = AgentEventQuery::new("ws-1")
            .with_status(AgentEventStatus::Draft)
            .with_agent("task_creator");
        assert_eq!(query.workspace_id, "ws-1");
        assert_eq!(query.status, Some(AgentEventStatus::Draft));
        assert_eq!(query.agent.as_deref(), Some("task_creator"));
    }

    #[test]
    fn test_query_deserialize_without_filters() {
        let query: AgentEventQuery =
            serde_json::from_str(r#"{"workspace_id":"ws-9"}"#).unwrap();
        assert_eq!(query, AgentEventQuery::new("ws-9"));
    }

    #[test]
    fn test_created_at_utc() {
        let event = AgentEvent {
            id: 1,
            workspace_id: "ws".into(),
            agent: "a".into(),
            action: "b".into(),
            input: JsonObject::new(),
            output: None,
            status: AgentEventStatus::Draft,
            created_at: 1_700_000_000_000,
        };
        assert_eq!(
            event.created_at_utc().unwrap().timestamp(),
            1_700_000_000
        );
    }
}
