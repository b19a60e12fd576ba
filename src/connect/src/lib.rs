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

//! Connect RPC error handling.
//!
//! This crate decodes the errors returned by services that implement the
//! [Connect protocol]. An error arrives either as a complete response body,
//! or as an HTTP status plus headers or trailers, sometimes with a body.
//! The [error] module turns those pieces into a single
//! [ErrorEnvelope][error::ErrorEnvelope], and lets applications extract the
//! typed details attached to it.
//!
//! [Connect protocol]: https://connectrpc.com/docs/protocol/

/// The core error types.
pub mod error;

/// Case-insensitive error metadata.
pub mod metadata;
