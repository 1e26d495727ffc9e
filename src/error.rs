//! User-facing error taxonomy for portfolio generation.
//!
//! Every failure that leaves the orchestrator is one of these variants;
//! transport and decoding errors are mapped before they cross that boundary.

use serde::Serialize;
use std::fmt;

/// Coarse failure category reported alongside the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    InvalidInput,
    NotFound,
    Unavailable,
    MalformedResponse,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::InvalidInput => "invalid input",
            ErrorCategory::NotFound => "not found",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::MalformedResponse => "malformed response",
        };
        f.write_str(name)
    }
}

/// A failed portfolio request. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    /// Empty or whitespace-only handle, rejected before any request.
    #[error("Please enter a GitHub username.")]
    InvalidInput,

    /// The backend reported that the handle does not exist.
    #[error("User not found. Please check the username and try again.")]
    NotFound { handle: String },

    /// Network, server or deadline failure.
    #[error("Failed to generate portfolio. Please try again.")]
    Unavailable { reason: String },

    /// The backend answered 2xx but the payload could not be normalized.
    #[error("The portfolio service returned an unexpected response.")]
    MalformedResponse { reason: String },
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::InvalidInput => ErrorCategory::InvalidInput,
            PortfolioError::NotFound { .. } => ErrorCategory::NotFound,
            PortfolioError::Unavailable { .. } => ErrorCategory::Unavailable,
            PortfolioError::MalformedResponse { .. } => ErrorCategory::MalformedResponse,
        }
    }

    /// Internal detail for logs; never shown in place of the user message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PortfolioError::Unavailable { reason } | PortfolioError::MalformedResponse { reason } => {
                Some(reason)
            }
            PortfolioError::NotFound { handle } => Some(handle),
            PortfolioError::InvalidInput => None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        PortfolioError::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        PortfolioError::Unavailable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            PortfolioError::InvalidInput.category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            PortfolioError::NotFound {
                handle: "ghost".to_string()
            }
            .category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            PortfolioError::unavailable("timeout").category(),
            ErrorCategory::Unavailable
        );
        assert_eq!(
            PortfolioError::malformed("no profile").category(),
            ErrorCategory::MalformedResponse
        );
    }

    #[test]
    fn test_user_messages() {
        let err = PortfolioError::NotFound {
            handle: "ghost".to_string(),
        };
        assert!(err.to_string().contains("User not found"));

        let err = PortfolioError::unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to generate portfolio. Please try again."
        );
        // Transport detail stays out of the user message
        assert!(!err.to_string().contains("connection refused"));
        assert_eq!(err.detail(), Some("connection refused"));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::MalformedResponse.to_string(), "malformed response");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not found");
    }
}
