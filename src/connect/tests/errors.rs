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

use connect_rpc::error::{Code, DetailPayload, ErrorEnvelope, MalformedEnvelope, build};
use connect_rpc::metadata::Metadata;
use pretty_assertions::assert_eq;
use test_utils::fixtures::{ErrorInfo, RetryInfo, SimpleResponse};
use test_utils::samples::{OVERLOADED_MESSAGE, overloaded_error_body};

type Result = anyhow::Result<()>;

fn foobar() -> SimpleResponse {
    SimpleResponse {
        hostname: "foobar".into(),
        ..Default::default()
    }
}

#[test]
fn decode_and_unpack() -> Result {
    let _guard = test_utils::tracing::enable_tracing();
    let body = overloaded_error_body(&foobar());
    let error = ErrorEnvelope::decode(&body)?;
    assert_eq!(error.code(), Code::Unavailable);
    assert_eq!(error.message(), Some(OVERLOADED_MESSAGE));
    assert!(error.exception().is_none(), "{error:?}");
    assert_eq!(error.details().len(), 1, "{error:?}");
    assert_eq!(error.details()[0].type_name(), "grpc.testing.SimpleResponse");
    assert_eq!(error.unpack_detail::<SimpleResponse>(), Some(foobar()));
    assert!(error.metadata().is_empty(), "{error:?}");
    Ok(())
}

#[test]
fn build_with_body_and_headers() {
    let body = overloaded_error_body(&foobar());
    let headers = [
        ("sOmEkEy", vec!["foo"]),
        ("otherKey1", vec!["BAR", "bAz"]),
    ];
    let error = build(Code::Aborted, headers, Some(body.as_slice()));

    assert_eq!(error.code(), Code::Unavailable);
    assert_eq!(error.message(), Some(OVERLOADED_MESSAGE));
    assert!(error.exception().is_none(), "{error:?}");
    assert_eq!(error.details().len(), 1, "{error:?}");
    assert_eq!(error.unpack_detail::<SimpleResponse>(), Some(foobar()));

    let want = Metadata::from_iter([
        ("somekey", vec!["foo"]),
        ("otherkey1", vec!["BAR", "bAz"]),
    ]);
    assert_eq!(error.metadata(), &want);
    let keys = error.metadata().keys().collect::<Vec<_>>();
    assert_eq!(keys, vec!["otherkey1", "somekey"]);
}

#[test]
fn build_without_body() {
    let error = build(Code::Unavailable, [("Retry-After", ["30"])], None);
    assert_eq!(error.code(), Code::Unavailable);
    assert_eq!(error.message(), None);
    assert!(error.exception().is_none(), "{error:?}");
    assert!(error.details().is_empty(), "{error:?}");
    assert_eq!(error.metadata().first("retry-after"), Some("30"));
}

#[test]
fn build_with_unusable_body() {
    let bodies: [&[u8]; 4] = [b"", b"{}", b"not json", br#"{"code": "bogus"}"#];
    for body in bodies {
        let error = build(Code::DeadlineExceeded, Vec::<(&str, Vec<&str>)>::new(), Some(body));
        assert_eq!(error.code(), Code::DeadlineExceeded, "{body:?}");
        assert_eq!(error.message(), None, "{body:?}");
        assert!(error.details().is_empty(), "{body:?}");
    }
}

#[test]
fn decode_simple() -> Result {
    let error = ErrorEnvelope::decode(br#"{"code": "unavailable"}"#)?;
    assert_eq!(error.code(), Code::Unavailable);
    assert_eq!(error.message(), None);
    assert!(error.exception().is_none(), "{error:?}");
    assert!(error.details().is_empty(), "{error:?}");
    assert!(error.metadata().is_empty(), "{error:?}");
    Ok(())
}

#[test]
fn decode_empty_object() {
    let got = ErrorEnvelope::decode(b"{}");
    assert!(matches!(got, Err(MalformedEnvelope::MissingCode)), "{got:?}");
}

#[test]
fn http_status_fallback() {
    let fallback = Code::from_http_status(429);
    let error = build(fallback, [("content-type", ["application/json"])], None);
    assert_eq!(error.code(), Code::Unavailable);
    assert_eq!(error.to_string(), "unavailable");
}

#[test]
fn encode_then_decode() -> Result {
    let info = ErrorInfo {
        reason: "RATE_LIMITED".into(),
        domain: "example.com".into(),
        ..Default::default()
    };
    let retry = RetryInfo {
        retry_delay: Some(prost_types::Duration {
            seconds: 30,
            nanos: 0,
        }),
    };
    let error = ErrorEnvelope::new(Code::ResourceExhausted)
        .with_message("quota exceeded")
        .with_detail(DetailPayload::from_msg(&info))
        .with_detail(DetailPayload::from_msg(&retry));

    let got = ErrorEnvelope::decode(&error.encode())?;
    assert_eq!(got, error);
    assert_eq!(got.unpack_detail::<ErrorInfo>(), Some(info));
    assert_eq!(got.unpack_detail::<RetryInfo>(), Some(retry));
    assert_eq!(got.unpack_detail::<SimpleResponse>(), None);
    Ok(())
}
