use std::fmt;

/// Comprehensive error types for trendscope operations
#[derive(Debug)]
pub enum TrendscopeError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Dataset could not be loaded or has an unusable shape
    DataLoad(String),

    /// Malformed delimited text at a given (1-indexed) line
    Parse { line: usize, message: String },

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for TrendscopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendscopeError::Io(err) => write!(f, "IO error: {err}"),
            TrendscopeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TrendscopeError::DataLoad(msg) => write!(f, "Data load error: {msg}"),
            TrendscopeError::Parse { line, message } => {
                write!(f, "Parse error: line {line}: {message}")
            }
            TrendscopeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            TrendscopeError::Json(err) => write!(f, "JSON error: {err}"),
            TrendscopeError::FileNotFound(path) => write!(f, "File not found: {path}"),
            TrendscopeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for TrendscopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrendscopeError::Io(err) => Some(err),
            TrendscopeError::TomlParsing(err) => Some(err),
            TrendscopeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrendscopeError {
    fn from(err: std::io::Error) -> Self {
        TrendscopeError::Io(err)
    }
}

impl From<toml::de::Error> for TrendscopeError {
    fn from(err: toml::de::Error) -> Self {
        TrendscopeError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for TrendscopeError {
    fn from(err: serde_json::Error) -> Self {
        TrendscopeError::Json(err)
    }
}

/// Type alias for Results using TrendscopeError
pub type Result<T> = std::result::Result<T, TrendscopeError>;
