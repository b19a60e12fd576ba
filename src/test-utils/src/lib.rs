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

//! Test helpers shared by the connect-rpc crates.

/// Protobuf messages used as error details in tests.
pub mod fixtures;

/// Sample error bodies, encoded independently of the crates under test.
pub mod samples;

/// Helpers to enable and capture logs in tests.
pub mod tracing;
