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

//! Define the traits and functions shared by all detail messages.

use crate::MessageError as Error;

/// A trait that must be implemented by all messages carried in error details.
///
/// Error details are tagged with the fully qualified name of their type. The
/// tag is used to validate extraction against the requested type, so the
/// value returned by `typename()` must match the Protobuf package and message
/// name, e.g. `google.rpc.ErrorInfo`.
pub trait Message: prost::Message + Default + std::fmt::Debug + 'static {
    /// The fully qualified name of this message.
    fn typename() -> &'static str;
}

/// Serializes `message` into its binary representation.
pub fn serialize<T: Message>(message: &T) -> bytes::Bytes {
    bytes::Bytes::from(message.encode_to_vec())
}

/// Deserializes a `T` from its binary representation.
///
/// The bytes are not tagged, so only the encoding is validated.
pub fn deserialize<T: Message>(bytes: &[u8]) -> Result<T, Error> {
    T::decode(bytes).map_err(|e| Error::deser(T::typename(), e))
}

/// Deserializes a `T` from bytes tagged with `tag`.
///
/// Fails with [Error::TypeMismatch] if the tag does not name `T`.
pub fn deserialize_tagged<T: Message>(tag: &str, bytes: &[u8]) -> Result<T, Error> {
    if !is_type::<T>(tag) {
        return Err(Error::TypeMismatch {
            want: T::typename(),
            got: tag.to_string(),
        });
    }
    deserialize(bytes)
}

/// Returns true if `tag` names the message type `T`.
pub fn is_type<T: Message>(tag: &str) -> bool {
    typename_of(tag) == T::typename()
}

/// Extracts the fully qualified type name from a type tag.
///
/// Connect details use bare names such as `google.rpc.ErrorInfo`, while
/// `google.protobuf.Any` uses type URLs such as
/// `type.googleapis.com/google.rpc.ErrorInfo`. Both refer to the same type.
pub fn typename_of(tag: &str) -> &str {
    tag.rsplit_once('/').map_or(tag, |(_, name)| name)
}
