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

//! Message codec for Connect error details.
//!
//! Connect errors carry a list of details. Each detail is a Protobuf message,
//! serialized in binary form, and tagged with the fully qualified name of its
//! type. This crate defines the [Message] trait implemented by every type that
//! can appear in those details, the functions to convert messages to and from
//! their binary form, and a [TypeRegistry] to decode details whose type is
//! only known at runtime.
//!
//! The binary encoding is implemented by [prost]. Any type deriving
//! [prost::Message] can become a detail by implementing [Message]:
//!
//! ```
//! use connect_message::Message;
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! pub struct RetryHint {
//!     #[prost(int64, tag = "1")]
//!     pub seconds: i64,
//! }
//!
//! impl Message for RetryHint {
//!     fn typename() -> &'static str {
//!         "example.v1.RetryHint"
//!     }
//! }
//!
//! let bytes = connect_message::serialize(&RetryHint { seconds: 30 });
//! let got = connect_message::deserialize::<RetryHint>(&bytes)?;
//! assert_eq!(got.seconds, 30);
//! # Ok::<(), connect_message::MessageError>(())
//! ```

mod error;
pub use error::MessageError;
mod message;
pub use message::*;
mod registry;
pub use registry::*;
