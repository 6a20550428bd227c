// Error types for IPv6 route parsing and retrieval

use std::net::AddrParseError;
use std::num::ParseIntError;

use thiserror::Error;

/// Why a destination prefix string could not be parsed
#[derive(Error, Debug)]
pub enum PrefixError {
    #[error("missing '/' between address and prefix length")]
    MissingSlash,

    #[error("invalid IPv6 address: {0}")]
    InvalidAddress(#[from] AddrParseError),

    #[error("invalid prefix length {0:?}")]
    InvalidLength(String),

    #[error("prefix length {0} exceeds 128")]
    LengthOutOfRange(u16),
}

/// A single field value that could not be converted
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("{value:?} is not a valid integer")]
    InvalidInteger {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{value:?} is not a valid boolean")]
    InvalidBoolean { value: String },

    #[error("{value:?} is not a valid destination prefix")]
    InvalidPrefix {
        value: String,
        #[source]
        source: PrefixError,
    },
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("line {line}: bad value for '{label}'")]
    RouteParse {
        line: usize,
        label: &'static str,
        #[source]
        source: FieldError,
    },

    #[error("Failed to execute command: {0}")]
    CommandExecution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route retrieval is not supported on {0}")]
    UnsupportedPlatform(String),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert error to user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::RouteParse { .. } => {
                "The route listing contained a value that could not be parsed. No routes were printed.".to_string()
            }
            AppError::CommandExecution(_) => {
                "Failed to run netsh. Make sure it is installed and on PATH.".to_string()
            }
            AppError::Io(_) => {
                "Failed to read route output. Check the input file and its permissions.".to_string()
            }
            AppError::Config(_) => {
                "Configuration error. Check your config file or command-line arguments.".to_string()
            }
            AppError::UnsupportedPlatform(_) => {
                "netsh is only available on Windows. Use --input to parse a saved capture.".to_string()
            }
        }
    }
}
