//! agent-events - 查询 workspace 下的 agent 事件
//!
//! 每行输出一个 JSON 对象，按创建时间倒序。

use std::sync::Arc;

use agent_event_db::{AgentEvent, AgentEventQuery, AgentEventQueryHandler, AgentEventStatus, DbConfig, EventDB};
use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn usage(bin: &str) -> String {
    format!(
        "用法: {} <数据库路径> <workspace_id> [--status draft|executed|error] [--agent NAME]",
        bin
    )
}

fn parse_args(args: &[String]) -> Result<(String, AgentEventQuery)> {
    let bin = args.first().map(String::as_str).unwrap_or("agent-events");
    if args.len() < 3 {
        bail!(usage(bin));
    }

    let db_path = args[1].clone();
    let mut query = AgentEventQuery::new(args[2].clone());

    let mut rest = args[3..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .with_context(|| format!("{} 缺少参数值", flag))?;
        match flag.as_str() {
            "--status" => {
                let status: AgentEventStatus = value.parse()?;
                query = query.with_status(status);
            }
            "--agent" => query = query.with_agent(value.clone()),
            other => bail!("未知参数: {}\n{}", other, usage(bin)),
        }
    }

    Ok((db_path, query))
}

/// 先查询再计数。total 只用于日志摘要，与查询不在同一次读取中，
/// 并发写入时两者可能不一致。
fn fetch_with_total(db: Arc<EventDB>, query: &AgentEventQuery) -> Result<(Vec<AgentEvent>, i64)> {
    let handler = AgentEventQueryHandler::new(db.clone());
    let events = handler.fetch(query)?;
    let total = db.count_events(&query.workspace_id)?;
    Ok((events, total))
}

fn main() -> Result<()> {
    // 日志写到 stderr，stdout 只留给 JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("agent_event_db=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (db_path, query) = parse_args(&args)?;

    let db = Arc::new(EventDB::connect(DbConfig::local(&db_path))?);
    let (events, total) = fetch_with_total(db, &query)?;

    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }

    tracing::info!(
        "workspace {}: 匹配 {} / 共 {} 条事件",
        query.workspace_id,
        events.len(),
        total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_with_filters() {
        let (db_path, query) = parse_args(&args(&[
            "agent-events",
            "/tmp/events.db",
            "ws-1",
            "--status",
            "draft",
            "--agent",
            "task_creator",
        ]))
        .unwrap();

        assert_eq!(db_path, "/tmp/events.db");
        assert_eq!(query.status, Some(AgentEventStatus::Draft));
        assert_eq!(query.agent.as_deref(), Some("task_creator"));
    }

    #[test]
    fn test_parse_args_rejects_unknown_flag() {
        let err = parse_args(&args(&["agent-events", "db", "ws", "--limit", "3"])).unwrap_err();
        assert!(format!("{err}").contains("--limit"));
    }

    #[test]
    fn test_total_counts_whole_workspace() {
        let db = Arc::new(EventDB::open_in_memory().unwrap());
        {
            let conn = db.connection().lock();
            for status in ["draft", "executed", "error"] {
                conn.execute(
                    "INSERT INTO agent_events (workspace_id, agent, action, input, status, created_at)
                     VALUES ('ws', 'task_creator', 'noop', '{}', ?1, 1)",
                    [status],
                )
                .unwrap();
            }
        }

        let query = AgentEventQuery::new("ws").with_status(AgentEventStatus::Draft);
        let (events, total) = fetch_with_total(db, &query).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(total, 3);
    }
}
