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

use super::{Code, DetailPayload, MalformedEnvelope};
use crate::metadata::Metadata;
use message::{DynMessage, Message, TypeRegistry};
use serde_json::{Map, Value};

/// An error returned by a Connect RPC.
///
/// Connect services report errors using a JSON object with a required `code`
/// and optional `message` and `details` fields. The error may also have
/// metadata, the headers and trailers received with it.
///
/// Use [decode][ErrorEnvelope::decode] to parse a standalone error body, and
/// [build][crate::error::build] to combine an error body with the metadata
/// and status received from the transport.
///
/// # Example
/// ```
/// # use connect_rpc::error::{Code, ErrorEnvelope};
/// let body = br#"{"code": "unavailable", "message": "overloaded: back off and retry"}"#;
/// let error = ErrorEnvelope::decode(body)?;
/// assert_eq!(error.code(), Code::Unavailable);
/// assert_eq!(error.message(), Some("overloaded: back off and retry"));
/// assert!(error.details().is_empty());
/// # Ok::<(), connect_rpc::error::MalformedEnvelope>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorEnvelope {
    code: Code,
    message: Option<String>,
    exception: Option<ExceptionInfo>,
    details: Vec<DetailPayload>,
    metadata: Metadata,
}

/// An exception reported by the service runtime.
///
/// Some Connect servers include the type and message of the exception that
/// caused the error. This information is purely diagnostic and its format is
/// not stable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExceptionInfo {
    /// The exception type, as named by the server runtime.
    pub type_name: String,
    /// The exception message.
    pub message: String,
}

impl ExceptionInfo {
    /// Creates the exception information from its type and message.
    pub fn new<T: Into<String>, M: Into<String>>(type_name: T, message: M) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    fn from_wire(value: &Value) -> Option<Self> {
        let type_name = value.get("type").and_then(Value::as_str);
        let message = value.get("message").and_then(Value::as_str);
        match (type_name, message) {
            (Some(t), Some(m)) => Some(Self::new(t, m)),
            _ => {
                tracing::debug!("discarding malformed `exception` in error body: {value}");
                None
            }
        }
    }

    fn to_wire(&self) -> Value {
        serde_json::json!({"type": self.type_name, "message": self.message})
    }
}

impl ErrorEnvelope {
    /// Creates an error with `code` and no other information.
    pub fn new(code: Code) -> Self {
        Self {
            code,
            message: None,
            exception: None,
            details: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// The error for calls cancelled by the application.
    pub fn canceled() -> Self {
        Self::new(Code::Canceled).with_message("request canceled by client")
    }

    /// The error for calls that did not complete before their deadline.
    pub fn deadline_exceeded() -> Self {
        Self::new(Code::DeadlineExceeded).with_message("timed out")
    }

    /// Sets the message.
    pub fn with_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = Some(v.into());
        self
    }

    /// Sets the exception information.
    pub fn with_exception(mut self, v: ExceptionInfo) -> Self {
        self.exception = Some(v);
        self
    }

    /// Appends a detail.
    pub fn with_detail<T: Into<DetailPayload>>(mut self, v: T) -> Self {
        self.details.push(v.into());
        self
    }

    /// Replaces the metadata.
    pub fn with_metadata<T: Into<Metadata>>(mut self, v: T) -> Self {
        self.metadata = v.into();
        self
    }

    /// The error code.
    pub fn code(&self) -> Code {
        self.code
    }

    /// The developer-facing error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The exception reported by the service runtime, if any.
    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }

    /// The error details, in the order received.
    pub fn details(&self) -> &[DetailPayload] {
        &self.details
    }

    /// The headers and trailers received with the error.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Parses a Connect error body.
    ///
    /// The body must be a JSON object with a `code` string naming one of the
    /// Connect error codes. All other fields are optional, and malformed
    /// values in them are ignored. Unknown fields are ignored too.
    ///
    /// The body never includes metadata, the result has empty metadata.
    pub fn decode(bytes: &[u8]) -> Result<Self, MalformedEnvelope> {
        let value = serde_json::from_slice::<Value>(bytes).map_err(MalformedEnvelope::Syntax)?;
        let object = match value {
            Value::Object(o) => o,
            other => return Err(MalformedEnvelope::not_an_object(&other)),
        };
        let code = match object.get("code") {
            Some(Value::String(name)) => name.parse::<Code>()?,
            _ => return Err(MalformedEnvelope::MissingCode),
        };
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let exception = object.get("exception").and_then(ExceptionInfo::from_wire);
        let details = match object.get("details") {
            Some(Value::Array(elements)) => elements
                .iter()
                .enumerate()
                .filter_map(|(index, e)| DetailPayload::from_wire(index, e))
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self {
            code,
            message,
            exception,
            details,
            metadata: Metadata::new(),
        })
    }

    /// The JSON representation of the error, as sent in a Connect error body.
    ///
    /// The metadata is not included, it is sent as headers or trailers.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("code".into(), Value::String(self.code.name().into()));
        if let Some(message) = &self.message {
            object.insert("message".into(), Value::String(message.clone()));
        }
        if let Some(exception) = &self.exception {
            object.insert("exception".into(), exception.to_wire());
        }
        if !self.details.is_empty() {
            let details = self.details.iter().map(DetailPayload::to_wire).collect();
            object.insert("details".into(), Value::Array(details));
        }
        Value::Object(object)
    }

    /// Serializes the error into a Connect error body.
    pub fn encode(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_json().to_string())
    }

    /// Returns the first detail of type `T`.
    ///
    /// Returns `None` if there are no details of type `T`, or if the first
    /// such detail cannot be decoded.
    ///
    /// # Example
    /// ```
    /// # use connect_rpc::error::{Code, ErrorEnvelope};
    /// # #[derive(Clone, PartialEq, prost::Message)]
    /// # pub struct RetryHint {
    /// #     #[prost(int64, tag = "1")]
    /// #     pub seconds: i64,
    /// # }
    /// # impl message::Message for RetryHint {
    /// #     fn typename() -> &'static str { "example.v1.RetryHint" }
    /// # }
    /// # let error = ErrorEnvelope::new(Code::Unavailable)
    /// #     .with_detail(connect_rpc::error::DetailPayload::from_msg(&RetryHint { seconds: 30 }));
    /// if let Some(hint) = error.unpack_detail::<RetryHint>() {
    ///     println!("retry in {}s", hint.seconds);
    /// }
    /// ```
    pub fn unpack_detail<T: Message>(&self) -> Option<T> {
        self.details
            .iter()
            .find(|d| d.is::<T>())
            .and_then(|d| d.to_msg::<T>().ok())
    }

    /// Returns all the details of type `T` that can be decoded, in order.
    pub fn unpack_details<T: Message>(&self) -> Vec<T> {
        self.details
            .iter()
            .filter(|d| d.is::<T>())
            .filter_map(|d| d.to_msg::<T>().ok())
            .collect()
    }

    /// Decodes each detail using `registry`.
    ///
    /// The result has one element per detail, in order. The element is
    /// `None` if the registry does not know the detail type, or if the
    /// detail cannot be decoded.
    pub fn resolve_details(&self, registry: &TypeRegistry) -> Vec<Option<Box<dyn DynMessage>>> {
        self.details
            .iter()
            .map(|d| registry.decode(d.type_name(), d.value()).ok())
            .collect()
    }
}

impl std::fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ErrorEnvelope {}

impl From<Code> for ErrorEnvelope {
    fn from(code: Code) -> Self {
        Self::new(code)
    }
}

impl TryFrom<&[u8]> for ErrorEnvelope {
    type Error = MalformedEnvelope;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}

impl TryFrom<&bytes::Bytes> for ErrorEnvelope {
    type Error = MalformedEnvelope;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}

impl serde::Serialize for ErrorEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_json(), serializer)
    }
}
