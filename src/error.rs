use std::fmt;

#[derive(Debug)]
pub enum ConvoError {
    ApiError {
        status: u16,
        message: String,
    },
    /// The completion call returned no extractable text.
    EmptyResponse,
    /// A run reached the failed terminal state, with the service message.
    RunFailed(String),
    /// A run completed but no assistant message was found on the thread.
    NoMessage,
    /// Structured-output JSON was malformed or missing the expected field.
    SchemaParse(String),
    /// Run polling exceeded the configured deadline.
    PollTimeout,
    ConfigError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for ConvoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvoError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            ConvoError::EmptyResponse => write!(f, "Model returned no content"),
            ConvoError::RunFailed(msg) => write!(f, "Run failed: {}", msg),
            ConvoError::NoMessage => write!(f, "No assistant message found on thread"),
            ConvoError::SchemaParse(msg) => write!(f, "Structured output parse error: {}", msg),
            ConvoError::PollTimeout => write!(f, "Run polling timed out"),
            ConvoError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ConvoError::NetworkError(e) => write!(f, "Network error: {}", e),
            ConvoError::IoError(e) => write!(f, "IO error: {}", e),
            ConvoError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConvoError::YamlError(e) => write!(f, "YAML error: {}", e),
            ConvoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConvoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvoError::NetworkError(e) => Some(e),
            ConvoError::IoError(e) => Some(e),
            ConvoError::JsonError(e) => Some(e),
            ConvoError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConvoError {
    fn from(err: reqwest::Error) -> Self {
        ConvoError::NetworkError(err)
    }
}

impl From<std::io::Error> for ConvoError {
    fn from(err: std::io::Error) -> Self {
        ConvoError::IoError(err)
    }
}

impl From<serde_json::Error> for ConvoError {
    fn from(err: serde_json::Error) -> Self {
        ConvoError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ConvoError {
    fn from(err: serde_yaml::Error) -> Self {
        ConvoError::YamlError(err)
    }
}

impl From<anyhow::Error> for ConvoError {
    fn from(err: anyhow::Error) -> Self {
        ConvoError::Other(err.to_string())
    }
}

impl From<String> for ConvoError {
    fn from(msg: String) -> Self {
        ConvoError::Other(msg)
    }
}

impl From<&str> for ConvoError {
    fn from(msg: &str) -> Self {
        ConvoError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConvoError>;
