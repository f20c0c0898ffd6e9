//! Global error handling for codedigest
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for codedigest operations
#[derive(Error, Debug)]
pub enum DigestError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output extension does not map to a known format
    #[error("Unsupported format '{0}'. Use .xml, .json, or .yaml/.yml")]
    UnsupportedFormat(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Writer errors
    #[error("Writer error: {0}")]
    Writer(String),
}

/// Specialized Result type for codedigest operations
pub type Result<T> = std::result::Result<T, DigestError>;

/// Creates a DigestError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DigestError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
