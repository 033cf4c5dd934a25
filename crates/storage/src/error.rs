//! Storage error types

use thiserror::Error;

/// Result type alias for gateway operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Gateway failures
///
/// An unacknowledged update is **not** an error: `update_by_id` and
/// `append_to_array` report it as `Ok(false)`. Errors mean the store could
/// not complete the call at all, and the caller must not assume the write
/// did or did not land.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store could not be reached or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Document could not be encoded, decoded or merged
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Store could not complete the operation
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable(reason.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(format!("I/O error: {}", e))
    }
}

/// Every gateway failure surfaces to the domain as `StoreUnavailable`,
/// except undecodable documents, which are invariant violations.
impl From<StoreError> for ticketmaster_core::Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(reason) => ticketmaster_core::Error::StoreUnavailable { reason },
            StoreError::Serialization(reason) => ticketmaster_core::Error::Internal { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("connection reset");
        assert_eq!(err.to_string(), "store unavailable: connection reset");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_into_domain_error() {
        let err: ticketmaster_core::Error = StoreError::unavailable("down").into();
        assert!(matches!(err, ticketmaster_core::Error::StoreUnavailable { .. }));

        let err: ticketmaster_core::Error = StoreError::Serialization("bad".into()).into();
        assert!(matches!(err, ticketmaster_core::Error::Internal { .. }));
    }
}
