//! Environment variable loading and management.

use std::env;
use std::path::Path;

/// Loads environment variables from a .env file and the system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    #[allow(dead_code)]
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to .env file. If None, no file is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        // Only load a .env file if an explicit path was provided. This avoids
        // picking up repository or system .env files during unit tests which
        // expect default values.
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    eprintln!("Warning: Failed to load .env file: {}", e);
                }
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// Get LLM provider selection from environment.
    ///
    /// Returns the provider name (e.g. "openai") or None to use the
    /// configured default.
    pub fn llm_provider(&self) -> Option<String> {
        env::var("LLM_PROVIDER").ok()
    }

    /// Get the API key for the given provider, if set.
    ///
    /// Looks up `<PROVIDER>_API_KEY`, e.g. `OPENAI_API_KEY`.
    pub fn api_key(&self, provider: &str) -> Option<String> {
        env::var(format!("{}_API_KEY", provider.to_uppercase())).ok()
    }

    /// Get log level override from environment (`ASKDB_LOG`).
    pub fn log_level(&self) -> Option<String> {
        env::var("ASKDB_LOG").ok()
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_provider_selection() {
        env::remove_var("LLM_PROVIDER");
        let loader = EnvironmentLoader::new(None);
        assert!(loader.llm_provider().is_none());

        env::set_var("LLM_PROVIDER", "openai");
        assert_eq!(loader.llm_provider().as_deref(), Some("openai"));
        env::remove_var("LLM_PROVIDER");
    }

    #[test]
    fn test_api_key_lookup() {
        env::set_var("TESTPROV_API_KEY", "sk-test");
        let loader = EnvironmentLoader::new(None);

        assert_eq!(loader.api_key("testprov").as_deref(), Some("sk-test"));
        assert!(loader.api_key("otherprov").is_none());
        env::remove_var("TESTPROV_API_KEY");
    }

    #[test]
    fn test_env_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "ASKDB_ENV_FILE_TEST=loaded\n").unwrap();

        let _loader = EnvironmentLoader::new(Some(&path));
        assert_eq!(env::var("ASKDB_ENV_FILE_TEST").as_deref(), Ok("loaded"));
        env::remove_var("ASKDB_ENV_FILE_TEST");
    }
}
