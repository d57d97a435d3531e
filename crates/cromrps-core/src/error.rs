//! Error types for CromRPS

use crate::types::LinkId;
use thiserror::Error;

/// Result type alias for CromRPS operations
pub type CromResult<T> = Result<T, CromError>;

/// Main error type for CromRPS
///
/// Every variant is recoverable: the host reports it to the user and keeps
/// running with the previous page still on screen.
#[derive(Error, Debug)]
pub enum CromError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Reload with no page loaded yet; a kind of empty input
    #[error("Empty input: nothing to reload")]
    NothingToReload,

    #[error("Failed to fetch URL: {status}")]
    Http { status: u16 },

    #[error("Failed: {0}")]
    Transport(String),

    #[error("Unknown link: {0}")]
    UnknownLink(LinkId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CromError {
    /// Navigation was triggered without any address to go to
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Reload was requested before any page loaded successfully
    pub fn nothing_to_reload() -> Self {
        Self::NothingToReload
    }

    /// Create a new HTTP status error
    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput(_) | Self::NothingToReload)
    }

    /// Short title for the notice the host shows for this error.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NothingToReload => "Reload",
            _ => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_has_status() {
        let err = CromError::http(404);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_transport_message_has_description() {
        let err = CromError::transport("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_nothing_to_reload_is_empty_input() {
        let err = CromError::nothing_to_reload();
        assert!(err.is_empty_input());
        assert_eq!(err.title(), "Reload");
        assert_eq!(CromError::empty_input("no address").title(), "Error");
    }

    #[test]
    fn test_title_independent_of_message() {
        let err = CromError::empty_input("nothing to reload");
        assert!(err.is_empty_input());
        assert_eq!(err.title(), "Error");
        assert!(CromError::nothing_to_reload()
            .to_string()
            .contains("nothing to reload"));
    }
}
