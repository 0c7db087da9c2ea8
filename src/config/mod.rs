//! Configuration and environment loading.

mod config;
mod environment;

pub use config::{
    AgentConfig, Configuration, ConfigurationLoader, ExecutionConfig, LoggingConfig,
};
pub use environment::EnvironmentLoader;
