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

use super::{Code, ErrorEnvelope};
use crate::metadata::Metadata;

/// Creates the error for a failed call from its metadata and body.
///
/// `fallback` is the code signaled by the transport, for example inferred
/// from the HTTP status with [Code::from_http_status], or read from a
/// trailer. The body, if present and valid, is more specific and its code
/// takes precedence. Without a usable body the error has the `fallback`
/// code and no other information.
///
/// The `headers` keys are normalized to lowercase, see [Metadata], and the
/// result always carries them as its metadata.
///
/// # Example
/// ```
/// # use connect_rpc::error::{build, Code};
/// let body = br#"{"code": "unavailable", "message": "overloaded: back off and retry"}"#;
/// let error = build(Code::Aborted, [("sOmEkEy", ["foo"])], Some(body.as_slice()));
/// assert_eq!(error.code(), Code::Unavailable);
/// assert_eq!(error.metadata().first("somekey"), Some("foo"));
///
/// let error = build(Code::Aborted, [("sOmEkEy", ["foo"])], None);
/// assert_eq!(error.code(), Code::Aborted);
/// ```
pub fn build<H, K, I, V>(fallback: Code, headers: H, body: Option<&[u8]>) -> ErrorEnvelope
where
    H: IntoIterator<Item = (K, I)>,
    K: AsRef<str>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    ErrorEnvelope::from_parts(fallback, headers.into_iter().collect(), body)
}

impl ErrorEnvelope {
    /// Creates the error for a failed call from normalized metadata and body.
    ///
    /// See [build][crate::error::build] for the details.
    pub fn from_parts(fallback: Code, metadata: Metadata, body: Option<&[u8]>) -> Self {
        merge(fallback, metadata, decode_body(body))
    }
}

/// The result of parsing the error body, if any.
#[derive(Debug)]
enum BodyOutcome {
    Decoded(ErrorEnvelope),
    Unusable,
}

fn decode_body(body: Option<&[u8]>) -> BodyOutcome {
    let Some(bytes) = body.filter(|b| !b.is_empty()) else {
        return BodyOutcome::Unusable;
    };
    match ErrorEnvelope::decode(bytes) {
        Ok(envelope) => BodyOutcome::Decoded(envelope),
        Err(e) => {
            tracing::debug!("ignoring unusable error body: {e:?}");
            BodyOutcome::Unusable
        }
    }
}

fn merge(fallback: Code, metadata: Metadata, body: BodyOutcome) -> ErrorEnvelope {
    match body {
        BodyOutcome::Decoded(envelope) => envelope.with_metadata(metadata),
        BodyOutcome::Unusable => ErrorEnvelope::new(fallback).with_metadata(metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DetailPayload, ExceptionInfo};
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use test_utils::fixtures::SimpleResponse;

    fn simple() -> SimpleResponse {
        SimpleResponse {
            hostname: "foobar".into(),
            ..Default::default()
        }
    }

    fn headers() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![("sOmEkEy", vec!["foo"]), ("otherKey1", vec!["BAR", "bAz"])]
    }

    fn want_metadata() -> Metadata {
        Metadata::from_iter([("somekey", vec!["foo"]), ("otherkey1", vec!["BAR", "bAz"])])
    }

    #[test]
    fn body_wins() {
        let body = test_utils::samples::overloaded_error_body(&simple());
        let got = build(Code::Aborted, headers(), Some(body.as_slice()));
        assert_eq!(got.code(), Code::Unavailable);
        assert_eq!(got.message(), Some("overloaded: back off and retry"));
        assert_eq!(got.exception(), None);
        assert_eq!(got.details().len(), 1);
        assert_eq!(got.unpack_detail::<SimpleResponse>(), Some(simple()));
        assert_eq!(got.metadata(), &want_metadata());
    }

    #[test_case(Code::Aborted)]
    #[test_case(Code::Unknown)]
    #[test_case(Code::Unavailable)]
    #[test_case(Code::Unauthenticated)]
    fn body_code_ignores_fallback(fallback: Code) {
        let got = build(fallback, headers(), Some(br#"{"code": "not_found"}"#.as_slice()));
        assert_eq!(got.code(), Code::NotFound);
    }

    #[test_case(None; "absent")]
    #[test_case(Some(b"".as_slice()); "empty")]
    #[test_case(Some(b"{}".as_slice()); "missing code")]
    #[test_case(Some(b"<html>bad gateway</html>".as_slice()); "not json")]
    #[test_case(Some(br#"{"code": "UNAVAILABLE", "message": "m"}"#.as_slice()); "unknown code")]
    #[test_case(Some(br#"["unavailable"]"#.as_slice()); "not an object")]
    fn fallback(body: Option<&[u8]>) {
        let got = build(Code::Aborted, headers(), body);
        let want = ErrorEnvelope::new(Code::Aborted).with_metadata(want_metadata());
        assert_eq!(got, want);
    }

    #[test]
    fn body_metadata_replaced() -> Result<()> {
        let body = ErrorEnvelope::new(Code::Internal)
            .with_message("boom")
            .with_exception(ExceptionInfo::new("RuntimeError", "boom"))
            .with_detail(DetailPayload::from_msg(&simple()))
            .with_metadata(Metadata::from_iter([("x-from-body", ["ignored"])]))
            .encode();
        let got = build(Code::Unknown, [("X-From-Headers", ["kept"])], Some(&body[..]));
        let want = ErrorEnvelope::new(Code::Internal)
            .with_message("boom")
            .with_exception(ExceptionInfo::new("RuntimeError", "boom"))
            .with_detail(DetailPayload::from_msg(&simple()))
            .with_metadata(Metadata::from_iter([("x-from-headers", ["kept"])]));
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn merges_header_case() {
        let got = build(
            Code::Unknown,
            [("sOmEkEy", vec!["foo"]), ("SOMEKEY", vec!["bar"])],
            None,
        );
        let want = Metadata::from_iter([("somekey", vec!["foo", "bar"])]);
        assert_eq!(got.metadata(), &want);
    }

    #[test]
    fn no_headers() {
        let got = build(Code::Unknown, Vec::<(String, Vec<String>)>::new(), None);
        assert!(got.metadata().is_empty(), "{got:?}");
        assert_eq!(got.code(), Code::Unknown);
    }

    #[test]
    fn hash_map_headers() {
        let headers = std::collections::HashMap::from([(
            "Grpc-Status-Details".to_string(),
            vec!["a".to_string()],
        )]);
        let got = build(Code::Internal, headers, None);
        assert_eq!(got.metadata().first("grpc-status-details"), Some("a"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn from_parts_with_header_map() {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-request-id", http::HeaderValue::from_static("abc123"));
        let got = ErrorEnvelope::from_parts(
            Code::from_http_status(503),
            Metadata::from(&headers),
            None,
        );
        assert_eq!(got.code(), Code::Unavailable);
        assert_eq!(got.metadata().first("X-Request-Id"), Some("abc123"));
    }

    #[test]
    fn merge_is_single_decision() -> Result<()> {
        let decoded = ErrorEnvelope::decode(br#"{"code": "data_loss"}"#)?;
        let got = merge(Code::Aborted, Metadata::new(), BodyOutcome::Decoded(decoded));
        assert_eq!(got.code(), Code::DataLoss);
        let got = merge(Code::Aborted, Metadata::new(), BodyOutcome::Unusable);
        assert_eq!(got.code(), Code::Aborted);
        Ok(())
    }
}
