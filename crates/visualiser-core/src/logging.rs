//! Logging configuration
//!
//! The subscriber itself is installed by the binary; this module only holds
//! the persisted settings and the log-file housekeeping.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Prefix of every log file name
pub const LOG_FILE_PREFIX: &str = "visualiser";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level name: trace, debug, info, warn, error or off
    pub level: String,
    /// Write logs to stderr
    pub console_output: bool,
    /// Write logs to a file in `log_dir`
    pub file_output: bool,
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Number of log files kept by [`LogConfig::cleanup_old_logs`]
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from("logs"),
            max_log_files: 5,
        }
    }
}

impl LogConfig {
    /// Parsed level, `INFO` when the name is not recognised
    pub fn parse_level(&self) -> LevelFilter {
        LevelFilter::from_str(self.level.trim()).unwrap_or(LevelFilter::INFO)
    }

    /// Create `log_dir` if file output is enabled
    pub fn ensure_log_directory(&self) -> std::io::Result<()> {
        if self.file_output {
            std::fs::create_dir_all(&self.log_dir)?;
        }
        Ok(())
    }

    /// Today's log file
    pub fn current_log_path(&self) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d");
        self.log_dir
            .join(format!("{}_{}.log", LOG_FILE_PREFIX, date))
    }

    /// Delete all but the newest `max_log_files` log files
    ///
    /// Returns the number of files removed.
    pub fn cleanup_old_logs(&self) -> std::io::Result<usize> {
        if !self.log_dir.is_dir() {
            return Ok(0);
        }

        let mut logs: Vec<(std::time::SystemTime, PathBuf)> = std::fs::read_dir(&self.log_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_log_file(path))
            .filter_map(|path| {
                let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((modified, path))
            })
            .collect();

        if logs.len() <= self.max_log_files {
            return Ok(0);
        }

        // Newest first
        logs.sort_by(|a, b| b.0.cmp(&a.0));

        let mut removed = 0;
        for (_, path) in logs.into_iter().skip(self.max_log_files) {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
        Ok(removed)
    }
}

fn is_log_file(path: &Path) -> bool {
    let is_log = path.extension().and_then(|e| e.to_str()) == Some("log");
    let has_prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
    is_log && has_prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let mut config = LogConfig::default();
        assert_eq!(config.parse_level(), LevelFilter::INFO);

        config.level = "debug".to_string();
        assert_eq!(config.parse_level(), LevelFilter::DEBUG);

        config.level = "WARN".to_string();
        assert_eq!(config.parse_level(), LevelFilter::WARN);

        config.level = "loud".to_string();
        assert_eq!(config.parse_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_current_log_path() {
        let config = LogConfig {
            log_dir: PathBuf::from("/tmp/vis"),
            ..Default::default()
        };
        let path = config.current_log_path();
        assert!(path.starts_with("/tmp/vis"));
        assert!(is_log_file(&path));
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            log_dir: dir.path().to_path_buf(),
            max_log_files: 2,
            file_output: true,
            ..Default::default()
        };

        for day in 1..=4 {
            let path = dir.path().join(format!("visualiser_2024-01-0{}.log", day));
            std::fs::write(&path, "log").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        let removed = config.cleanup_old_logs().unwrap();
        assert_eq!(removed, 2);

        let remaining_logs = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| is_log_file(&e.path()))
            .count();
        assert_eq!(remaining_logs, 2);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_missing_directory() {
        let config = LogConfig {
            log_dir: PathBuf::from("/nonexistent/visualiser/logs"),
            ..Default::default()
        };
        assert_eq!(config.cleanup_old_logs().unwrap(), 0);
    }
}
