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

use message::Message;
use std::collections::HashMap;

/// `grpc.testing.SimpleResponse` from the gRPC interop protos.
///
/// Only the scalar fields are included.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SimpleResponse {
    #[prost(string, tag = "2")]
    pub username: String,
    #[prost(string, tag = "3")]
    pub oauth_scope: String,
    #[prost(string, tag = "4")]
    pub server_id: String,
    #[prost(string, tag = "6")]
    pub hostname: String,
}

impl Message for SimpleResponse {
    fn typename() -> &'static str {
        "grpc.testing.SimpleResponse"
    }
}

/// `google.rpc.ErrorInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct ErrorInfo {
    #[prost(string, tag = "1")]
    pub reason: String,
    #[prost(string, tag = "2")]
    pub domain: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

impl Message for ErrorInfo {
    fn typename() -> &'static str {
        "google.rpc.ErrorInfo"
    }
}

/// `google.rpc.RetryInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct RetryInfo {
    #[prost(message, optional, tag = "1")]
    pub retry_delay: Option<prost_types::Duration>,
}

impl Message for RetryInfo {
    fn typename() -> &'static str {
        "google.rpc.RetryInfo"
    }
}
