use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Token exchange failed: {0}")]
    #[diagnostic(code(studygrid::auth))]
    Auth(String),

    #[error("Fetch failed: {0}")]
    #[diagnostic(code(studygrid::fetch))]
    Fetch(String),

    #[error("Unexpected response shape: {0}")]
    #[diagnostic(code(studygrid::parse))]
    Parse(String),

    #[error("Request timed out: {0}")]
    #[diagnostic(code(studygrid::timeout))]
    Timeout(String),

    #[error("Cancelled: {0}")]
    #[diagnostic(code(studygrid::cancelled))]
    Cancelled(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(studygrid::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(studygrid::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(studygrid::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(studygrid::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(studygrid::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type WidgetResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create token-exchange errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}
