//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A severity name that is none of the five known levels
    #[error("unknown log level {0:?}")]
    UnknownLevel(String),

    /// IO error with context
    #[error("IO error while {operation} '{path}': {source}")]
    IoOperation {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The relay worker is no longer accepting entries
    #[error("Logger already stopped")]
    LoggerStopped,

    /// The process-wide logger was already set or used
    #[error("Global logger already installed")]
    GlobalAlreadyInstalled,
}

impl LoggerError {
    /// Create an unknown level error naming the offending input
    pub fn unknown_level(input: impl Into<String>) -> Self {
        LoggerError::UnknownLevel(input.into())
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }
}
