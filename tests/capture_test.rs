//! Tests for [`CaptureSink`] and [`BufferSink`] — buffer-then-replay
//! semantics.

use http::{HeaderName, HeaderValue, StatusCode};
use mimir::{BufferSink, CaptureSink, ResponseSink};

fn name(s: &'static str) -> HeaderName {
    HeaderName::from_static(s)
}

fn value(s: &'static str) -> HeaderValue {
    HeaderValue::from_static(s)
}

// =========================================================================
// Status defaulting
// =========================================================================

#[tokio::test]
async fn first_write_defaults_status_to_ok() {
    let mut sink = CaptureSink::new();
    sink.write(b"body").await.unwrap();

    let capture = sink.finalize();
    assert_eq!(capture.status, Some(StatusCode::OK));
}

#[tokio::test]
async fn explicit_status_survives_body_write() {
    let mut sink = CaptureSink::new();
    sink.set_status(StatusCode::NOT_FOUND);
    sink.write(b"missing").await.unwrap();

    assert_eq!(sink.finalize().status, Some(StatusCode::NOT_FOUND));
}

#[test]
fn untouched_sink_captures_nothing() {
    let capture = CaptureSink::new().finalize();
    assert_eq!(capture.status, None);
    assert!(capture.headers.is_empty());
    assert!(capture.body.is_empty());
}

#[tokio::test]
async fn status_change_after_body_start_is_ignored() {
    let mut sink = CaptureSink::new();
    sink.write(b"body").await.unwrap();
    sink.set_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(sink.finalize().status, Some(StatusCode::OK));
}

// =========================================================================
// Headers
// =========================================================================

#[tokio::test]
async fn headers_freeze_once_body_starts() {
    let mut sink = CaptureSink::new();
    sink.append_header(name("x-before"), value("1"));
    sink.write(b"body").await.unwrap();
    sink.append_header(name("x-after"), value("2"));

    let capture = sink.finalize();
    assert!(capture.headers.contains_key("x-before"));
    assert!(!capture.headers.contains_key("x-after"));
}

#[tokio::test]
async fn multi_value_headers_are_kept_as_a_multimap() {
    let mut sink = CaptureSink::new();
    sink.append_header(name("x-a"), value("1"));
    sink.append_header(name("x-a"), value("2"));
    sink.write(b"body").await.unwrap();

    let capture = sink.finalize();
    let values: Vec<_> = capture.headers.get_all("x-a").iter().collect();
    assert_eq!(values, [&value("1"), &value("2")]);
}

// =========================================================================
// Content-type sniffing
// =========================================================================

#[tokio::test]
async fn content_type_sniffed_on_first_write() {
    let mut sink = CaptureSink::new();
    sink.write(b"<html><body>hi</body></html>").await.unwrap();

    assert_eq!(
        sink.finalize().headers.get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn sniffed_type_is_set_exactly_once() {
    let mut sink = CaptureSink::new();
    sink.write(b"plain text lead-in, ").await.unwrap();
    // A later write with binary bytes must not flip the type.
    sink.write(b"\x00\x01\x02").await.unwrap();

    assert_eq!(
        sink.finalize().headers.get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn preset_content_type_is_not_overridden() {
    let mut sink = CaptureSink::new();
    sink.append_header(name("content-type"), value("application/json"));
    sink.write(br#"{"a":1}"#).await.unwrap();

    assert_eq!(
        sink.finalize().headers.get("content-type").unwrap(),
        "application/json"
    );
}

// =========================================================================
// Body accumulation and finalize
// =========================================================================

#[tokio::test]
async fn writes_accumulate_in_order() {
    let mut sink = CaptureSink::new();
    sink.write(b"hello, ").await.unwrap();
    sink.write(b"world").await.unwrap();

    assert_eq!(&sink.finalize().body[..], b"hello, world");
}

#[tokio::test]
async fn finalize_is_idempotent() {
    let mut sink = CaptureSink::new();
    sink.set_status(StatusCode::ACCEPTED);
    sink.append_header(name("x-a"), value("1"));
    sink.write(b"body").await.unwrap();

    let first = sink.finalize();
    let second = sink.finalize();
    assert_eq!(first.status, second.status);
    assert_eq!(first.headers, second.headers);
    assert_eq!(first.body, second.body);
}

// =========================================================================
// BufferSink pass-through
// =========================================================================

#[tokio::test]
async fn buffer_sink_records_verbatim() {
    let mut sink = BufferSink::new();
    assert_eq!(sink.status(), None);

    sink.set_status(StatusCode::OK);
    sink.append_header(name("x-a"), value("1"));
    sink.write(b"abc").await.unwrap();
    sink.write(b"def").await.unwrap();

    assert_eq!(sink.status(), Some(StatusCode::OK));
    assert_eq!(sink.headers().get("x-a").unwrap(), "1");
    assert_eq!(sink.body(), b"abcdef");
}

#[tokio::test]
async fn buffer_sink_does_not_default_or_sniff() {
    // Unlike CaptureSink, a plain buffer applies no response-writer
    // conventions of its own.
    let mut sink = BufferSink::new();
    sink.write(b"body").await.unwrap();

    assert_eq!(sink.status(), None);
    assert!(sink.headers().get("content-type").is_none());
}
