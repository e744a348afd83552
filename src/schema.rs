//! 数据库 Schema 定义

/// 核心 Schema SQL
pub const SCHEMA_SQL: &str = r#"
-- Agent events 表
CREATE TABLE IF NOT EXISTS agent_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workspace_id TEXT NOT NULL,     -- 所属 workspace
    agent TEXT NOT NULL,            -- 产生事件的 agent
    action TEXT NOT NULL,           -- 执行的动作
    input TEXT NOT NULL DEFAULT '{}',   -- 输入 (JSON object)
    output TEXT,                    -- 输出 (JSON object，可为空)
    status TEXT NOT NULL CHECK (status IN ('draft', 'executed', 'error')),
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);

-- 索引
CREATE INDEX IF NOT EXISTS idx_agent_events_recency ON agent_events(workspace_id, created_at DESC, id DESC);
CREATE INDEX IF NOT EXISTS idx_agent_events_status ON agent_events(workspace_id, status);
CREATE INDEX IF NOT EXISTS idx_agent_events_agent ON agent_events(workspace_id, agent);
"#;

/// 查询列（顺序与 `reader` 的行映射一致）
pub const EVENT_COLUMNS: &str =
    "id, workspace_id, agent, action, input, output, status, created_at";
