// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// The error codes defined by the Connect protocol.
///
/// Sometimes multiple error codes may apply. Services should return the most
/// specific error code that applies. For example, prefer `out_of_range` over
/// `failed_precondition` if both codes apply. Similarly prefer `not_found` or
/// `already_exists` over `failed_precondition`.
///
/// The numeric values match the gRPC status codes. There is no `ok` code:
/// successful calls do not produce an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Code {
    /// The operation was cancelled, typically by the caller.
    ///
    /// HTTP Mapping: 499 Client Closed Request
    Canceled = 1,

    /// Unknown error. For example, this error may be returned when an error
    /// received from another address space belongs to an error space that is
    /// not known in this address space. Also errors raised by APIs that do
    /// not return enough error information may be converted to this error.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    Unknown = 2,

    /// The client specified an invalid argument. Note that this differs from
    /// `failed_precondition`. `invalid_argument` indicates arguments that are
    /// problematic regardless of the state of the system (e.g., a malformed
    /// file name).
    ///
    /// HTTP Mapping: 400 Bad Request
    InvalidArgument = 3,

    /// The deadline expired before the operation could complete. For
    /// operations that change the state of the system, this error may be
    /// returned even if the operation has completed successfully.
    ///
    /// HTTP Mapping: 504 Gateway Timeout
    DeadlineExceeded = 4,

    /// Some requested entity (e.g., file or directory) was not found.
    ///
    /// HTTP Mapping: 404 Not Found
    NotFound = 5,

    /// The entity that a client attempted to create (e.g., file or directory)
    /// already exists.
    ///
    /// HTTP Mapping: 409 Conflict
    AlreadyExists = 6,

    /// The caller does not have permission to execute the specified
    /// operation. Use `unauthenticated` if the caller cannot be identified,
    /// and `resource_exhausted` for rejections caused by exhausting some
    /// resource.
    ///
    /// HTTP Mapping: 403 Forbidden
    PermissionDenied = 7,

    /// Some resource has been exhausted, perhaps a per-user quota, or perhaps
    /// the entire file system is out of space.
    ///
    /// HTTP Mapping: 429 Too Many Requests
    ResourceExhausted = 8,

    /// The operation was rejected because the system is not in a state
    /// required for the operation's execution. For example, the directory to
    /// be deleted is non-empty.
    ///
    /// Use the following guidelines to decide between `failed_precondition`,
    /// `aborted`, and `unavailable`:
    /// 1. Use `unavailable` if the client can retry just the failing call.
    /// 1. Use `aborted` if the client should retry at a higher level.
    /// 1. Use `failed_precondition` if the client should not retry until
    ///    the system state has been explicitly fixed.
    ///
    /// HTTP Mapping: 400 Bad Request
    FailedPrecondition = 9,

    /// The operation was aborted, typically due to a concurrency issue such as
    /// a sequencer check failure or transaction abort.
    ///
    /// HTTP Mapping: 409 Conflict
    Aborted = 10,

    /// The operation was attempted past the valid range. E.g., seeking or
    /// reading past end-of-file.
    ///
    /// HTTP Mapping: 400 Bad Request
    OutOfRange = 11,

    /// The operation is not implemented or is not supported/enabled in this
    /// service.
    ///
    /// HTTP Mapping: 501 Not Implemented
    Unimplemented = 12,

    /// Internal errors. Some invariants expected by the underlying system
    /// have been broken.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    Internal = 13,

    /// The service is currently unavailable. This is most likely a transient
    /// condition, which can be corrected by retrying with a backoff. Note
    /// that it is not always safe to retry non-idempotent operations.
    ///
    /// HTTP Mapping: 503 Service Unavailable
    Unavailable = 14,

    /// Unrecoverable data loss or corruption.
    ///
    /// HTTP Mapping: 500 Internal Server Error
    DataLoss = 15,

    /// The request does not have valid authentication credentials for the
    /// operation.
    ///
    /// HTTP Mapping: 401 Unauthorized
    Unauthenticated = 16,
}

/// A code name or number that is not part of the Connect protocol.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown status code value {0}")]
pub struct UnknownCode(String);

impl UnknownCode {
    /// The value that failed to convert.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Code {
    /// The name of the code in the Connect wire format.
    pub fn name(&self) -> &'static str {
        match self {
            Code::Canceled => "canceled",
            Code::Unknown => "unknown",
            Code::InvalidArgument => "invalid_argument",
            Code::DeadlineExceeded => "deadline_exceeded",
            Code::NotFound => "not_found",
            Code::AlreadyExists => "already_exists",
            Code::PermissionDenied => "permission_denied",
            Code::ResourceExhausted => "resource_exhausted",
            Code::FailedPrecondition => "failed_precondition",
            Code::Aborted => "aborted",
            Code::OutOfRange => "out_of_range",
            Code::Unimplemented => "unimplemented",
            Code::Internal => "internal",
            Code::Unavailable => "unavailable",
            Code::DataLoss => "data_loss",
            Code::Unauthenticated => "unauthenticated",
        }
    }

    /// The HTTP status used when a unary call fails with this code.
    pub fn http_status(&self) -> u16 {
        match self {
            Code::Canceled => 499,
            Code::Unknown => 500,
            Code::InvalidArgument => 400,
            Code::DeadlineExceeded => 504,
            Code::NotFound => 404,
            Code::AlreadyExists => 409,
            Code::PermissionDenied => 403,
            Code::ResourceExhausted => 429,
            Code::FailedPrecondition => 400,
            Code::Aborted => 409,
            Code::OutOfRange => 400,
            Code::Unimplemented => 501,
            Code::Internal => 500,
            Code::Unavailable => 503,
            Code::DataLoss => 500,
            Code::Unauthenticated => 401,
        }
    }

    /// Infers a code from an HTTP status.
    ///
    /// Used when a response fails before the service produces an error body,
    /// for example when a proxy rejects the request. The body, if any and if
    /// it can be parsed, takes precedence over this value.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Code::InvalidArgument,
            401 => Code::Unauthenticated,
            403 => Code::PermissionDenied,
            404 => Code::Unimplemented,
            408 => Code::DeadlineExceeded,
            409 => Code::Aborted,
            412 => Code::FailedPrecondition,
            413 => Code::ResourceExhausted,
            415 => Code::Internal,
            429 => Code::Unavailable,
            431 => Code::ResourceExhausted,
            502..=504 => Code::Unavailable,
            _ => Code::Unknown,
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::convert::From<Code> for String {
    fn from(value: Code) -> String {
        value.name().to_string()
    }
}

impl std::convert::From<Code> for i32 {
    fn from(value: Code) -> i32 {
        value as i32
    }
}

impl std::str::FromStr for Code {
    type Err = UnknownCode;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "canceled" => Ok(Code::Canceled),
            "unknown" => Ok(Code::Unknown),
            "invalid_argument" => Ok(Code::InvalidArgument),
            "deadline_exceeded" => Ok(Code::DeadlineExceeded),
            "not_found" => Ok(Code::NotFound),
            "already_exists" => Ok(Code::AlreadyExists),
            "permission_denied" => Ok(Code::PermissionDenied),
            "resource_exhausted" => Ok(Code::ResourceExhausted),
            "failed_precondition" => Ok(Code::FailedPrecondition),
            "aborted" => Ok(Code::Aborted),
            "out_of_range" => Ok(Code::OutOfRange),
            "unimplemented" => Ok(Code::Unimplemented),
            "internal" => Ok(Code::Internal),
            "unavailable" => Ok(Code::Unavailable),
            "data_loss" => Ok(Code::DataLoss),
            "unauthenticated" => Ok(Code::Unauthenticated),
            _ => Err(UnknownCode(value.to_string())),
        }
    }
}

impl std::convert::TryFrom<&str> for Code {
    type Error = UnknownCode;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::convert::TryFrom<i32> for Code {
    type Error = UnknownCode;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Code::Canceled),
            2 => Ok(Code::Unknown),
            3 => Ok(Code::InvalidArgument),
            4 => Ok(Code::DeadlineExceeded),
            5 => Ok(Code::NotFound),
            6 => Ok(Code::AlreadyExists),
            7 => Ok(Code::PermissionDenied),
            8 => Ok(Code::ResourceExhausted),
            9 => Ok(Code::FailedPrecondition),
            10 => Ok(Code::Aborted),
            11 => Ok(Code::OutOfRange),
            12 => Ok(Code::Unimplemented),
            13 => Ok(Code::Internal),
            14 => Ok(Code::Unavailable),
            15 => Ok(Code::DataLoss),
            16 => Ok(Code::Unauthenticated),
            _ => Err(UnknownCode(value.to_string())),
        }
    }
}

impl Serialize for Code {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn code_to_string() {
        let got = String::from(Code::AlreadyExists);
        assert_eq!(got, "already_exists");
    }

    #[test_case("canceled")]
    #[test_case("unknown")]
    #[test_case("invalid_argument")]
    #[test_case("deadline_exceeded")]
    #[test_case("not_found")]
    #[test_case("already_exists")]
    #[test_case("permission_denied")]
    #[test_case("resource_exhausted")]
    #[test_case("failed_precondition")]
    #[test_case("aborted")]
    #[test_case("out_of_range")]
    #[test_case("unimplemented")]
    #[test_case("internal")]
    #[test_case("unavailable")]
    #[test_case("data_loss")]
    #[test_case("unauthenticated")]
    fn code_roundtrip(input: &str) -> Result<()> {
        let code = Code::try_from(input)?;
        assert_eq!(String::from(code), input);
        assert_eq!(&format!("{code}"), input);
        assert_eq!(code.name(), input);

        let serialized = serde_json::to_value(code)?;
        assert_eq!(serialized, json!(input));
        let got = serde_json::from_value::<Code>(serialized)?;
        assert_eq!(got, code);

        let number = i32::from(code);
        assert_eq!(Code::try_from(number)?, code);
        Ok(())
    }

    #[test_case("ok"; "ok")]
    #[test_case("Unavailable"; "capitalized")]
    #[test_case("UNAVAILABLE"; "uppercase")]
    #[test_case("cancelled"; "british spelling")]
    #[test_case(" unavailable"; "leading space")]
    #[test_case(""; "empty")]
    fn code_try_from_string_error(input: &str) {
        let err = Code::try_from(input).unwrap_err();
        assert_eq!(err.value(), input);
        assert!(err.to_string().contains(input), "{err}");
    }

    #[test_case(0; "ok")]
    #[test_case(17; "too large")]
    #[test_case(-1; "negative")]
    fn code_try_from_number_error(input: i32) {
        let err = Code::try_from(input).unwrap_err();
        assert_eq!(err.value(), input.to_string());
    }

    #[test]
    fn code_deserialize_errors() {
        let err = serde_json::from_value::<Code>(json!("not-a-code"));
        assert!(err.is_err(), "{err:?}");
        let err = serde_json::from_value::<Code>(json!(14));
        assert!(err.is_err(), "{err:?}");
        let err = serde_json::from_value::<Code>(json!({"k": "v"}));
        assert!(err.is_err(), "{err:?}");
    }

    #[test_case(400, Code::InvalidArgument)]
    #[test_case(401, Code::Unauthenticated)]
    #[test_case(403, Code::PermissionDenied)]
    #[test_case(404, Code::Unimplemented)]
    #[test_case(408, Code::DeadlineExceeded)]
    #[test_case(409, Code::Aborted)]
    #[test_case(412, Code::FailedPrecondition)]
    #[test_case(413, Code::ResourceExhausted)]
    #[test_case(415, Code::Internal)]
    #[test_case(429, Code::Unavailable)]
    #[test_case(431, Code::ResourceExhausted)]
    #[test_case(502, Code::Unavailable)]
    #[test_case(503, Code::Unavailable)]
    #[test_case(504, Code::Unavailable)]
    #[test_case(200, Code::Unknown)]
    #[test_case(500, Code::Unknown)]
    #[test_case(418, Code::Unknown)]
    fn from_http_status(input: u16, want: Code) {
        assert_eq!(Code::from_http_status(input), want);
    }

    #[test_case(Code::Canceled, 499)]
    #[test_case(Code::InvalidArgument, 400)]
    #[test_case(Code::DeadlineExceeded, 504)]
    #[test_case(Code::NotFound, 404)]
    #[test_case(Code::ResourceExhausted, 429)]
    #[test_case(Code::Unimplemented, 501)]
    #[test_case(Code::Unavailable, 503)]
    #[test_case(Code::Unauthenticated, 401)]
    fn http_status(input: Code, want: u16) {
        assert_eq!(input.http_status(), want);
    }
}
