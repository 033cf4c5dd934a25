//! Response envelope.
//!
//! Every reply, success or failure, has the same shape:
//!
//! ```json
//! { "base": { "code": 0, "message": "success" }, "data": { ... } }
//! { "base": { "code": 1000, "message": "Illegal payload", "errorMessage": "status: ..." } }
//! ```
//!
//! `code == 0` means success. Failures carry the error's stable code and no
//! `data`. Successes with nothing to return omit `data` too.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Output, Result};

/// `base.code` of a successful reply
pub const SUCCESS_CODE: u32 = 0;

/// Status block of every reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    /// `0` on success, the error code otherwise
    pub code: u32,
    /// Short human-readable outcome
    pub message: String,
    /// Failure detail, when there is one
    #[serde(
        rename = "errorMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,
}

/// `{ base, data? }` reply envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T = Value> {
    /// Outcome
    pub base: Base,
    /// Payload; absent on failure and on data-less success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    /// Successful reply carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            base: Base {
                code: SUCCESS_CODE,
                message: message.into(),
                error_message: None,
            },
            data: Some(data),
        }
    }

    /// Successful reply without `data`
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            base: Base {
                code: SUCCESS_CODE,
                message: message.into(),
                error_message: None,
            },
            data: None,
        }
    }

    /// Failed reply for `error`
    pub fn error(error: &Error) -> Self {
        Self {
            base: Base {
                code: error.code(),
                message: error.message().to_string(),
                error_message: error.detail(),
            },
            data: None,
        }
    }

    /// Whether `base.code` signals success
    pub fn is_success(&self) -> bool {
        self.base.code == SUCCESS_CODE
    }
}

/// Wrap a command result in the envelope.
///
/// Returns the HTTP status together with the body. `message` is used on
/// success only; failures use the error's fixed message.
pub fn envelope(message: &str, result: Result<Output>) -> (u16, Response) {
    match result.and_then(Output::into_data) {
        Ok(Some(data)) => (200, Response::ok(message, data)),
        Ok(None) => (200, Response::done(message)),
        Err(error) => (error.status(), Response::error(&error)),
    }
}
