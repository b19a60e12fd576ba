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

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use message::{Message, MessageError};
use serde_json::Value;

// Connect writes standard base64 without padding, and readers must accept
// both padded and unpadded values. Non-zero trailing bits are ignored.
const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A serialized message attached to an error.
///
/// Connect errors may include any number of details. Each detail is a
/// Protobuf message in its binary form, tagged with the fully qualified name
/// of its type. The payload is not decoded until the application asks for a
/// specific type, see [ErrorEnvelope::unpack_detail][super::ErrorEnvelope::unpack_detail].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPayload {
    type_name: String,
    value: bytes::Bytes,
}

impl DetailPayload {
    /// Creates a detail from a type name and the serialized message.
    pub fn new<T, V>(type_name: T, value: V) -> Self
    where
        T: Into<String>,
        V: Into<bytes::Bytes>,
    {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Creates a detail by serializing `message`.
    ///
    /// # Example
    /// ```
    /// # use connect_rpc::error::DetailPayload;
    /// # #[derive(Clone, PartialEq, prost::Message)]
    /// # pub struct RetryHint {
    /// #     #[prost(int64, tag = "1")]
    /// #     pub seconds: i64,
    /// # }
    /// # impl message::Message for RetryHint {
    /// #     fn typename() -> &'static str { "example.v1.RetryHint" }
    /// # }
    /// let detail = DetailPayload::from_msg(&RetryHint { seconds: 30 });
    /// assert_eq!(detail.type_name(), "example.v1.RetryHint");
    /// assert_eq!(detail.to_msg::<RetryHint>()?.seconds, 30);
    /// # Ok::<(), message::MessageError>(())
    /// ```
    pub fn from_msg<T: Message>(message: &T) -> Self {
        Self::new(T::typename(), message::serialize(message))
    }

    /// The fully qualified name of the message type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The serialized message.
    pub fn value(&self) -> &bytes::Bytes {
        &self.value
    }

    /// Returns true if the detail contains a `T`.
    pub fn is<T: Message>(&self) -> bool {
        message::is_type::<T>(&self.type_name)
    }

    /// Extracts the message, if it is a `T`.
    ///
    /// Fails if the detail contains a different type, or if the serialized
    /// value cannot be decoded as a `T`.
    pub fn to_msg<T: Message>(&self) -> Result<T, MessageError> {
        message::deserialize_tagged::<T>(&self.type_name, &self.value)
    }

    /// Parses one element of the `details` array in a Connect error body.
    ///
    /// Details are diagnostic data, a malformed element is dropped and does
    /// not affect the other elements or the error.
    pub(crate) fn from_wire(index: usize, element: &Value) -> Option<Self> {
        let Some(type_name) = element.get("type").and_then(Value::as_str) else {
            tracing::debug!(index, "dropping error detail without a `type` string");
            return None;
        };
        let Some(encoded) = element.get("value").and_then(Value::as_str) else {
            tracing::debug!(
                index,
                type_name,
                "dropping error detail without a `value` string"
            );
            return None;
        };
        match decode_value(encoded) {
            Ok(value) => Some(Self::new(type_name, value)),
            Err(e) => {
                tracing::debug!(index, type_name, "dropping error detail: {e}");
                None
            }
        }
    }

    /// The JSON representation used in Connect error bodies.
    pub(crate) fn to_wire(&self) -> Value {
        serde_json::json!({
            "type": self.type_name,
            "value": STANDARD.encode(&self.value),
        })
    }
}

fn decode_value(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD
        .decode(encoded)
        .or_else(|e| URL_SAFE.decode(encoded).map_err(|_| e))
}
