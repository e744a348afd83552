//! 数据库配置

use std::path::{Path, PathBuf};

/// 环境变量：覆盖数据库文件路径
pub const DB_PATH_ENV: &str = "AGENT_EVENT_DB_PATH";

/// 默认文件名，位于 ~/.vimo/db/ 下
const DEFAULT_DB_FILE: &str = "agent-events.db";

/// 数据库配置（本地 SQLite 文件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    path: PathBuf,
}

impl DbConfig {
    pub fn local<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `AGENT_EVENT_DB_PATH` 优先，否则 ~/.vimo/db/agent-events.db
    pub fn from_env() -> Self {
        match std::env::var_os(DB_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::local(path),
            _ => Self::local(default_db_path()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".vimo").join("db").join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_config_keeps_path() {
        let config = DbConfig::local("/tmp/events.db");
        assert_eq!(config.path(), Path::new("/tmp/events.db"));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(default_db_path().ends_with(DEFAULT_DB_FILE));
    }
}
