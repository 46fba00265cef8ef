//! Error types for neurodrive_core.
//!
//! Only fatal conditions are errors. A degenerate gene pool is recovered
//! inside the engine and shows up in the generation report instead.

use thiserror::Error;

/// Main error type for engine and genome operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid topology, selection counts or tensor shapes
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The environment broke the report/bind contract
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
}

/// Result type alias for neurodrive_core operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new protocol violation.
    #[must_use]
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Self::ProtocolViolation(msg.into())
    }

    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation(_))
    }
}

/// Returns a configuration error when the condition does not hold.
macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::EngineError::configuration(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_config;
