/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Status values and helpers that annotate a failed status with
//! context.

use std::backtrace::Backtrace;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::factor::FactorError;

/// Canonical status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Code {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        };
        f.write_str(name)
    }
}

/// A status code together with a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Status {
    code: Code,
    message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The OK status.
    pub fn ok() -> Self {
        Self::new(Code::Ok, "")
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(Code::FailedPrecondition, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A broken factoring invariant is an internal error.
impl From<FactorError> for Status {
    fn from(err: FactorError) -> Self {
        Status::internal(err.to_string())
    }
}

/// Returns `prior` with `context` prepended to its message:
/// `"{context}: {message}"`.
///
/// # Panics
/// Panics if `prior` is OK.
pub fn add_status(prior: Status, context: &str) -> Status {
    assert!(!prior.is_ok(), "add_status: cannot annotate an OK status");
    Status {
        code: prior.code,
        message: format!("{}: {}", context, prior.message),
    }
}

/// Returns `prior` with `context` appended to its message:
/// `"{message}: {context}"`.
///
/// # Panics
/// Panics if `prior` is OK.
pub fn append_status(prior: Status, context: &str) -> Status {
    assert!(!prior.is_ok(), "append_status: cannot annotate an OK status");
    Status {
        code: prior.code,
        message: format!("{}: {}", prior.message, context),
    }
}

/// Logs `status` at debug level and the current backtrace at trace
/// level, then returns `status` unchanged.
///
/// # Panics
/// Panics if `status` is OK.
pub fn with_log_backtrace(status: Status) -> Status {
    assert!(!status.is_ok(), "with_log_backtrace: status is OK");
    tracing::debug!(code = %status.code, "{}", status);
    if tracing::enabled!(tracing::Level::TRACE) {
        tracing::trace!("{}", Backtrace::force_capture());
    }
    status
}
