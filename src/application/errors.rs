//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Plugin errors raised by consumers of the plugin registry.
///
/// Every kind carries an optional human-readable message and nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("{}", .0.as_deref().unwrap_or("Plugin error"))]
    Plugin(Option<String>),

    #[error("{}", .0.as_deref().unwrap_or("Plugin not found"))]
    NotFound(Option<String>),

    #[error("{}", .0.as_deref().unwrap_or("Plugin is disabled"))]
    Disabled(Option<String>),
}

impl PluginError {
    /// No plugin with this name is registered
    pub fn not_found(name: &str) -> Self {
        PluginError::NotFound(Some(format!("Plugin [{}] not found", name)))
    }

    /// The named plugin exists but is disabled
    pub fn disabled(name: &str) -> Self {
        PluginError::Disabled(Some(format!("Plugin [{}] is disabled", name)))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            PluginError::Plugin(msg) | PluginError::NotFound(msg) | PluginError::Disabled(msg) => {
                msg.as_deref()
            }
        }
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Command disabled: {0}")]
    Disabled(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Permission denied")]
    PermissionDenied,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
