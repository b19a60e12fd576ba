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

//! The Connect error model.
//!
//! Connect reports errors as a JSON object with a code, an optional message,
//! and optional details. The details are serialized Protobuf messages which
//! the application can extract once it knows what type to expect.
//!
//! # Examples
//!
//! ```
//! use connect_rpc::error::{build, Code, ErrorEnvelope};
//! fn handle_error(status: u16, headers: &[(&str, Vec<&str>)], body: &[u8]) {
//!     let fallback = Code::from_http_status(status);
//!     let error: ErrorEnvelope = build(fallback, headers.iter().cloned(), Some(body));
//!     match error.code() {
//!         Code::Unavailable => println!("try again later: {error}"),
//!         _ => println!("the service reported {error}"),
//!     }
//! }
//! ```

mod code;
pub use code::*;
mod details;
pub use details::*;
mod envelope;
pub use envelope::*;
mod factory;
pub use factory::build;
mod malformed;
pub use malformed::*;
