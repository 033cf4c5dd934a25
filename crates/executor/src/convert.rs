//! Error conversion from engine error types.
//!
//! This module provides conversions from the domain [`ticketmaster_core::Error`]
//! to the executor's [`Error`] type.

use crate::Error;
use ticketmaster_core::Error as CoreError;

/// Convert a domain error to an executor Error.
///
/// Validation errors keep their rendered violation list as the reason, so
/// the envelope's `errorMessage` names every offending field.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IllegalPayload(violations) => Error::IllegalPayload {
                reason: violations.to_string(),
            },
            CoreError::SprintNotFound { id } => Error::SprintNotFound { id },
            CoreError::MetricsNotFound { id } => Error::MetricsNotFound { id },
            CoreError::TicketNotFound { id } => Error::TicketNotFound { id },
            CoreError::SprintNotCreated { reason } => Error::SprintNotCreated { reason },
            CoreError::StoreUnavailable { reason } => Error::StoreUnavailable { reason },
            CoreError::Internal { reason } => Error::Internal { reason },
        }
    }
}

/// Convert a domain result to an executor result.
pub fn convert_result<T>(result: ticketmaster_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketmaster_core::ValidationError;

    #[test]
    fn test_validation_reason_lists_fields() {
        let err: Error = CoreError::IllegalPayload(ValidationError::single(
            "status",
            "expected one of [open, in_progress, done]",
        ))
        .into();
        match err {
            Error::IllegalPayload { reason } => {
                assert!(reason.starts_with("status: "));
            }
            other => panic!("Expected IllegalPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_keeps_id() {
        let err: Error = CoreError::sprint_not_found("abc").into();
        assert_eq!(err, Error::SprintNotFound { id: "abc".into() });

        let err: Error = CoreError::metrics_not_found("e1").into();
        assert_eq!(err, Error::MetricsNotFound { id: "e1".into() });

        let err: Error = CoreError::ticket_not_found("T-1").into();
        assert_eq!(err, Error::TicketNotFound { id: "T-1".into() });
        assert_eq!((err.code(), err.status(), err.detail()), (1004, 404, None));
    }

    #[test]
    fn test_store_errors_map_to_system_codes() {
        let err: Error = CoreError::StoreUnavailable {
            reason: "down".into(),
        }
        .into();
        assert_eq!(err.code(), 5001);

        let err: Error = CoreError::internal("bad doc").into();
        assert_eq!(err.code(), 5000);
    }
}
