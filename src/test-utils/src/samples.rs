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
use message::Message;

/// The message in [overloaded_error_body].
pub const OVERLOADED_MESSAGE: &str = "overloaded: back off and retry";

/// The example error from the Connect protocol documentation.
///
/// The body has code `unavailable`, the [OVERLOADED_MESSAGE], and a single
/// detail containing `detail`. The detail value uses padded base64 and
/// includes a `debug` field, as some servers do.
///
/// See <https://connectrpc.com/docs/protocol/#error-end-stream>.
pub fn overloaded_error_body<T: Message>(detail: &T) -> Vec<u8> {
    let value = base64::engine::general_purpose::STANDARD.encode(message::serialize(detail));
    serde_json::json!({
        "code": "unavailable",
        "message": OVERLOADED_MESSAGE,
        "details": [
            {
                "type": T::typename(),
                "value": value,
                "debug": {"retryDelay": "30s"},
            },
        ],
    })
    .to_string()
    .into_bytes()
}
