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

use super::UnknownCode;

/// The error body cannot be interpreted as a Connect error.
///
/// Only the `code` field is required in a Connect error body. This error is
/// returned when the body is not a JSON object, or when the `code` field is
/// missing or unrecognized. Problems in any other field degrade to a partial
/// result instead.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MalformedEnvelope {
    /// The body is not valid JSON.
    #[error("the error body is not valid JSON")]
    Syntax(#[source] serde_json::Error),

    /// The body is valid JSON, but not an object.
    #[error("the error body is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    /// The body has no `code` field, or the field is not a string.
    #[error("the error body does not have a `code` string field")]
    MissingCode,

    /// The `code` field does not name a Connect error code.
    #[error("the error body has an unrecognized `code`")]
    UnknownCode(#[from] UnknownCode),
}

impl MalformedEnvelope {
    pub(crate) fn not_an_object(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self::NotAnObject(kind)
    }
}
