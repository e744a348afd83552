//! 数据库连接

use crate::config::DbConfig;
use crate::error::Result;
use crate::schema;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::sync::Arc;

/// 数据库连接
pub struct EventDB {
    pub(crate) conn: Arc<Mutex<Connection>>,
    config: DbConfig,
}

impl EventDB {
    /// 连接本地 SQLite
    pub fn connect(config: DbConfig) -> Result<Self> {
        let path = config.path();

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!("数据库已连接: {:?}", path);
        Self::init(conn, config)
    }

    /// 内存数据库（测试和临时工具用）
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, DbConfig::local(":memory:"))
    }

    fn init(conn: Connection, config: DbConfig) -> Result<Self> {
        conn.execute_batch(schema::SCHEMA_SQL)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// 当前配置
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// 获取底层连接 (用于测试)
    #[doc(hidden)]
    pub fn connection(&self) -> &Arc<Mutex<Connection>> {
        &self.conn
    }

    /// 统计 workspace 下的事件数
    pub fn count_events(&self, workspace_id: &str) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM agent_events WHERE workspace_id = ?1",
            params![workspace_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_creates_table() {
        let db = EventDB::open_in_memory().unwrap();
        assert_eq!(db.count_events("ws-1").unwrap(), 0);
    }

    #[test]
    fn test_schema_is_reapplied_safely() {
        let db = EventDB::open_in_memory().unwrap();
        db.connection()
            .lock()
            .execute_batch(schema::SCHEMA_SQL)
            .unwrap();
        assert_eq!(db.count_events("ws-1").unwrap(), 0);
    }

    #[test]
    fn test_status_check_constraint() {
        let db = EventDB::open_in_memory().unwrap();
        let conn = db.connection().lock();
        let result = conn.execute(
            "INSERT INTO agent_events (workspace_id, agent, action, input, status, created_at)
             VALUES ('ws', 'a', 'b', '{}', 'pending', 1)",
            [],
        );
        assert!(result.is_err());
    }
}
