use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prayer::Prayer;

/// Result alias used across the salah crates.
pub type Result<T> = std::result::Result<T, SalahError>;

/// Errors from salah operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum SalahError {
    /// Invalid coordinate, date, offset or configuration value. Never retried.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The remote timezone service could not be reached.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A zone name was missing or could not be turned into an offset.
    #[error("Timezone resolution failed: {reason}")]
    TimezoneResolution { reason: String },

    /// The hour angle for a prayer has no solution and no high-latitude rule could replace it.
    #[error("{prayer} is undefined at latitude {latitude}")]
    UndefinedTime { prayer: Prayer, latitude: f64 },

    /// A named time was absent from a record set.
    #[error("Missing time for {name}")]
    MissingTime { name: String },

    /// A time-of-day string was not `HH:mm`.
    #[error("Invalid time {input:?}, expected HH:mm")]
    InvalidTime { input: String },
}

/// Coarse classification of [`SalahError`], for callers that branch on recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Network,
    TimezoneResolution,
    Computation,
    Input,
}

impl SalahError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates a `TimezoneResolution` error.
    pub fn timezone_resolution(reason: impl Into<String>) -> Self {
        Self::TimezoneResolution { reason: reason.into() }
    }

    /// Creates a `NetworkError`.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::NetworkError(reason.into())
    }

    /// Creates an `InvalidTime` error for the given input.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTime { input: input.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::Configuration,
            Self::NetworkError(_) => ErrorKind::Network,
            Self::TimezoneResolution { .. } => ErrorKind::TimezoneResolution,
            Self::UndefinedTime { .. } => ErrorKind::Computation,
            Self::MissingTime { .. } | Self::InvalidTime { .. } => ErrorKind::Input,
        }
    }

    /// Only network failures are worth retrying, and that is the caller's call.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SalahError::invalid_config("x").kind(), ErrorKind::Configuration);
        assert_eq!(SalahError::network("down").kind(), ErrorKind::Network);
        assert_eq!(SalahError::timezone_resolution("?").kind(), ErrorKind::TimezoneResolution);
        assert_eq!(
            SalahError::UndefinedTime { prayer: Prayer::Isha, latitude: 78.2 }.kind(),
            ErrorKind::Computation
        );
        assert_eq!(SalahError::invalid_time("25:00").kind(), ErrorKind::Input);
    }

    #[test]
    fn test_only_network_is_retryable() {
        assert!(SalahError::network("timeout").is_retryable());
        assert!(!SalahError::timezone_resolution("empty zone").is_retryable());
        assert!(!SalahError::invalid_config("lat").is_retryable());
    }

    #[test]
    fn test_display_messages() {
        let err = SalahError::UndefinedTime { prayer: Prayer::Fajr, latitude: 70.0 };
        assert_eq!(err.to_string(), "Fajr is undefined at latitude 70");
        let err = SalahError::invalid_time("7pm");
        assert_eq!(err.to_string(), "Invalid time \"7pm\", expected HH:mm");
    }
}
