use rusqlite::Connection;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::db::migrations::MigrationManager;

/// Directory under the home directory holding the board and its rc file
const APP_DIR: &str = ".taskflow";

/// Database connection manager
pub struct DbConnection;

impl DbConnection {
    fn app_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to locate home directory")?;
        Ok(home.join(APP_DIR))
    }

    /// Get the default database path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("board.db"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("rc"))
    }

    /// Get database path from configuration file or default
    pub fn resolve_path() -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            if let Some(location) = data_location(&config) {
                return Ok(resolve_relative(&config_path, location));
            }
        }

        Self::default_path()
    }

    /// Connect to the database, creating it and parent directories if needed
    pub fn connect() -> Result<Connection> {
        let db_path = Self::resolve_path()?;
        Self::connect_at(&db_path)
    }

    /// Connect to the database at an explicit path
    pub fn connect_at(db_path: &Path) -> Result<Connection> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        log::debug!("Opened board database at {}", db_path.display());
        Ok(conn)
    }

    /// Connect to an in-memory database (for testing)
    pub fn connect_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory database")?;

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }
}

/// Extract the `data.location` value from rc file contents
fn data_location(config: &str) -> Option<&str> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix("data.location="))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Relative locations resolve against the rc file's directory
fn resolve_relative(config_path: &Path, location: &str) -> PathBuf {
    let path = PathBuf::from(location);
    if path.is_relative() {
        match config_path.parent() {
            Some(dir) => dir.join(path),
            None => path,
        }
    } else {
        path
    }
}
