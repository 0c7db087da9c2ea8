//! Logging system for agent sessions.

use crate::phase::Phase;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Logger for agent sessions.
///
/// Creates markdown-formatted log files tracking session lifecycle, steps,
/// phase transitions, tool failures and completion. Logging failures are the
/// caller's concern to report; they must never abort a session.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
    log_level: String,
}

impl Logger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped file in temp directory.
    /// * `log_level` - Logging level (defaults to "INFO").
    pub fn new(log_file: Option<&Path>, log_level: Option<&str>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => {
                let mut dir = std::env::temp_dir();
                dir.push("askdb-logs");
                std::fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create log directory: {}", dir.display())
                })?;
                let filename = format!(
                    "session_{}_{}.md",
                    Utc::now().timestamp_millis(),
                    std::process::id()
                );
                dir.join(filename)
            }
        };

        let log_level = log_level.unwrap_or("INFO").to_string();

        // Ensure log directory exists
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self {
            log_file,
            log_level,
        };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    /// Path of the log file this logger writes to.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Configured log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Initialize the log file with header.
    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        let now: DateTime<Utc> = Utc::now();

        writeln!(file, "# Agent Session Log\n")?;
        writeln!(file, "Log started: {}\n", now.to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    /// Append content to log file.
    fn append_to_log(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    /// Log session start.
    pub fn log_session_start(&self, session_id: &str, provider: &str, model: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "## Session Started - {}\n\n**Session:** {}\n**Provider:** {}\n**Model:** {}\n\n",
            now.to_rfc3339(),
            session_id,
            provider,
            model
        );

        self.append_to_log(&content)?;
        println!("INFO: Session {} started ({} / {})", session_id, provider, model);
        Ok(())
    }

    /// Log one completed step.
    pub fn log_step(&self, step_number: u32, phase: Phase, tool_names: &[&str]) -> Result<()> {
        let tools = if tool_names.is_empty() {
            "(no tool calls)".to_string()
        } else {
            tool_names.join(", ")
        };
        let content = format!(
            "### Step {} ({})\n\nTools: {}\n\n",
            step_number, phase, tools
        );

        self.append_to_log(&content)
    }

    /// Log a phase transition.
    pub fn log_phase_transition(&self, from: Phase, to: Phase) -> Result<()> {
        let content = format!("**Phase:** {} -> {}\n\n", from, to);

        self.append_to_log(&content)?;
        println!("INFO: Phase advanced from {} to {}", from, to);
        Ok(())
    }

    /// Log a failed tool invocation.
    pub fn log_tool_error(&self, tool_name: &str, error: &str) -> Result<()> {
        let content = format!("**Tool error:** {} - {}\n\n", tool_name, error);

        self.append_to_log(&content)
    }

    /// Log session completion.
    pub fn log_completion(&self, reason: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!("## Session Completed - {}\n\n{}\n\n", now.to_rfc3339(), reason);

        self.append_to_log(&content)?;
        println!("INFO: Session completed: {}", reason);
        Ok(())
    }

    /// Log an error.
    pub fn log_error(&self, message: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!("**Error** ({}): {}\n\n", now.to_rfc3339(), message);

        self.append_to_log(&content)?;
        eprintln!("ERROR: {}", message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_log(logger: &Logger) -> String {
        std::fs::read_to_string(logger.log_file()).unwrap()
    }

    #[test]
    fn test_log_file_initialized_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.md");
        let logger = Logger::new(Some(&path), None).unwrap();

        let contents = read_log(&logger);
        assert!(contents.starts_with("# Agent Session Log"));
        assert_eq!(logger.log_level(), "INFO");
    }

    #[test]
    fn test_session_lifecycle_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.md");
        let logger = Logger::new(Some(&path), Some("DEBUG")).unwrap();

        logger.log_session_start("abc-123", "openai", "gpt-4.1").unwrap();
        logger
            .log_step(1, Phase::Planning, &["SearchCatalog", "FinalizePlan"])
            .unwrap();
        logger.log_phase_transition(Phase::Planning, Phase::Building).unwrap();
        logger.log_tool_error("ExecuteSQLWithRepair", "timeout").unwrap();
        logger.log_completion("terminal result after 4 steps").unwrap();

        let contents = read_log(&logger);
        assert!(contents.contains("abc-123"));
        assert!(contents.contains("Step 1 (planning)"));
        assert!(contents.contains("planning -> building"));
        assert!(contents.contains("ExecuteSQLWithRepair - timeout"));
        assert!(contents.contains("terminal result after 4 steps"));
    }

    #[test]
    fn test_default_location_under_temp_dir() {
        let logger = Logger::new(None, None).unwrap();
        assert!(logger.log_file().starts_with(std::env::temp_dir()));
        // Clean up the file we just created.
        let _ = std::fs::remove_file(logger.log_file());
    }
}
