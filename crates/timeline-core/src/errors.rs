//! Unified error system for timeline controllers
//!
//! Most failures in this domain are tolerated rather than surfaced: a missing
//! card or marker simply skips a step. The error type exists for the few
//! places where something genuinely went wrong (bad configuration, a host
//! adapter refusing a write) so that callers can log it with context.

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// Unified error type for timeline operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum TimelineError {
    /// Configuration value rejected by validation
    #[error("Invalid config: {field}: {message}")]
    InvalidConfig {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// Node handle not known to the host adapter
    #[error("Unknown node: {node}")]
    UnknownNode {
        /// The handle that failed to resolve
        node: NodeId,
    },

    /// Host environment refused or failed an operation
    #[error("Host error: {message}")]
    Host {
        /// Error message reported by the host
        message: String,
    },
}

impl TimelineError {
    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown node error
    pub fn unknown_node(node: NodeId) -> Self {
        Self::UnknownNode { node }
    }

    /// Create a host error
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config("<json>", err.to_string())
    }
}

/// Result type for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Log and discard a tolerated failure.
///
/// Controllers call host effects for visual side effects only; a failed write
/// must never abort the rest of the reaction.
pub(crate) fn tolerate(result: TimelineResult<()>, operation: &'static str) {
    if let Err(err) = result {
        tracing::warn!(operation, error = %err, "host operation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TimelineError::invalid_config("reveal.threshold", "must be within [0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid config: reveal.threshold: must be within [0, 1]"
        );

        let err = TimelineError::unknown_node(NodeId::new(7));
        assert_eq!(err.to_string(), "Unknown node: node#7");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TimelineError = json_err.into();
        assert!(matches!(err, TimelineError::InvalidConfig { .. }));
    }
}
