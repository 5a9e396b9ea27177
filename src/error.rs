use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(jadwalive::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(jadwalive::config))]
    Config(String),

    #[error("Event source error: {0}")]
    #[diagnostic(code(jadwalive::event_source))]
    EventSource(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(jadwalive::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(jadwalive::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(jadwalive::serialization))]
    Serialization(String),

    #[error("URL error: {0}")]
    #[diagnostic(code(jadwalive::url))]
    Url(#[from] url::ParseError),

    #[error("Other error: {0}")]
    #[diagnostic(code(jadwalive::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::EventSource(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create event source errors
pub fn event_source_error(message: &str) -> Error {
    Error::EventSource(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
