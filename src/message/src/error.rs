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

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Indicates a problem converting between a [Message][crate::Message] and its
/// binary representation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MessageError {
    /// The payload is tagged with a different type than the one requested.
    #[error("expected a {want} message, found {got}")]
    TypeMismatch { want: &'static str, got: String },

    /// The payload type is not known to the [TypeRegistry][crate::TypeRegistry].
    #[error("the type registry has no entry for {0}")]
    UnknownType(String),

    /// The payload bytes are not a valid encoding of the requested type.
    #[error("cannot deserialize a {typename} message")]
    Deserialization {
        typename: &'static str,
        #[source]
        source: BoxError,
    },
}

impl MessageError {
    pub(crate) fn deser<T: Into<BoxError>>(typename: &'static str, source: T) -> Self {
        Self::Deserialization {
            typename,
            source: source.into(),
        }
    }

    /// Returns true if the payload type did not match the requested type.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::UnknownType(_))
    }

    /// Returns true if the payload bytes could not be decoded.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}
