//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Agent identity and model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,
    /// LLM provider identifier (e.g. "openai").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_agent_name() -> String {
    "askdb".to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

/// Step-loop execution limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Hard ceiling on steps per run.
    #[serde(default = "default_step_ceiling")]
    pub step_ceiling: u32,
    /// Token budget per model step.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Retries for failed model steps.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Optional throttle between model steps, in seconds.
    #[serde(default)]
    pub request_interval_seconds: Option<u64>,
}

fn default_step_ceiling() -> u32 {
    100
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_max_retries() -> u32 {
    3
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            step_ceiling: default_step_ceiling(),
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
            request_interval_seconds: None,
        }
    }
}

/// Session log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging level.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; a timestamped temp file is used when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Agent identity and model selection.
    #[serde(default)]
    pub agent: AgentConfig,
    /// Step-loop execution limits.
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Session log configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads configuration from a TOML file, falling back to defaults.
#[derive(Debug, Clone)]
pub struct ConfigurationLoader {
    /// The loaded configuration.
    pub config: Configuration,
    /// Path the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,
}

impl ConfigurationLoader {
    /// Initialize the loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to a TOML file. If None, defaults are used.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let config: Configuration = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
                Ok(Self {
                    config,
                    config_path: Some(path.to_path_buf()),
                })
            }
            None => Ok(Self {
                config: Configuration::default(),
                config_path: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let loader = ConfigurationLoader::new(None).unwrap();

        assert_eq!(loader.config.execution.step_ceiling, 100);
        assert_eq!(loader.config.execution.max_tokens, 4000);
        assert_eq!(loader.config.agent.model, "gpt-4.1");
        assert_eq!(loader.config.logging.level, "INFO");
        assert!(loader.config_path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[execution]\nstep_ceiling = 10\n\n[agent]\nmodel = \"gpt-4o\""
        )
        .unwrap();

        let loader = ConfigurationLoader::new(Some(&path)).unwrap();

        assert_eq!(loader.config.execution.step_ceiling, 10);
        assert_eq!(loader.config.execution.max_retries, 3);
        assert_eq!(loader.config.agent.model, "gpt-4o");
        assert_eq!(loader.config.agent.provider, "openai");
    }

    #[test]
    fn test_invalid_toml_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let error = ConfigurationLoader::new(Some(&path)).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ConfigurationLoader::new(Some(Path::new("/nonexistent/agent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = Configuration::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Configuration = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.execution.step_ceiling, config.execution.step_ceiling);
        assert_eq!(parsed.agent.name, config.agent.name);
    }
}
