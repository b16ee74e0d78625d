//! Error types for repick.
//!
//! Errors carry a machine-parseable code so a host workflow engine can
//! branch on failures without matching message strings.

use thiserror::Error;

/// Result type alias for repick operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of an explicit selection against the current list.
///
/// Recoverable by the caller: the selection state is unchanged after the
/// error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The value is not the display form of any element in the current list.
    #[error("'{0}' is not in the current list")]
    NotInList(String),
}

/// repick error types.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Node(_) => "NODE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Selection(_) => "SELECTION_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// Convert to a structured JSON response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_code() {
        let err = Error::from(SelectionError::NotInList("Option Z".to_string()));
        assert_eq!(err.code(), "SELECTION_ERROR");
        assert!(err.to_string().contains("Option Z"));
    }

    #[test]
    fn test_error_to_json() {
        let err = Error::Node("bad config".to_string());
        let json = err.to_json();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NODE_ERROR");
    }
}
