//! Error types for booster_audit

use std::fmt;

/// Unified error type for booster_audit operations
#[derive(Debug)]
pub enum AuditError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    Io(std::io::Error),
    /// Rate limit retries exhausted for a URL
    RetriesExhausted(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Network(e) => write!(f, "Network error: {}", e),
            AuditError::Parse(e) => write!(f, "Parse error: {}", e),
            AuditError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            AuditError::Io(e) => write!(f, "I/O error: {}", e),
            AuditError::RetriesExhausted(url) => {
                write!(f, "Rate limit retries exhausted for: {}", url)
            }
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Network(e) => Some(e),
            AuditError::Parse(e) => Some(e),
            AuditError::Io(e) => Some(e),
            AuditError::HttpStatus(_) => None,
            AuditError::RetriesExhausted(_) => None,
        }
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Network(err)
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Parse(err)
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err)
    }
}

/// Result alias for booster_audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
