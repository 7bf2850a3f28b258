use std::io::Write;
use std::time::Duration;

use scanward_client::{ScanClient, ScanError, ScanMetadata, ScanOutcome};
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

#[tokio::test]
async fn submit_sends_authorized_multipart_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .and(header("authorization", "Bearer T"))
        // Both multipart fields travel in the same body: the empty metadata
        // object and the raw file bytes.
        .and(body_string_contains("name=\"metadata\""))
        .and(body_string_contains("{}"))
        .and(body_string_contains("name=\"data\""))
        .and(body_string_contains("file contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "complete",
            "scan_result": "clean",
            "detections": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = sample_file(b"file contents");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let outcome = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap();

    match outcome {
        ScanOutcome::Complete(report) => {
            assert_eq!(report.verdict, "clean");
            assert!(report.detections.is_empty());
        }
        other => panic!("expected complete, got {other:?}"),
    }
}

#[tokio::test]
async fn accepted_response_yields_poll_reference() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "/api/scan/v1/abc")
                .insert_header("Retry-After", "5")
                .set_body_json(serde_json::json!({"status": "pending"})),
        )
        .mount(&server)
        .await;

    let file = sample_file(b"x");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let outcome = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap();

    match outcome {
        ScanOutcome::Pending(poll) => {
            assert_eq!(poll.path, "/api/scan/v1/abc");
            assert_eq!(poll.wait, Duration::from_secs(5));
        }
        other => panic!("expected pending, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_status_names_the_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let file = sample_file(b"x");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let err = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Protocol { status: 500 }));
    assert_eq!(
        err.to_string(),
        "unexpected response from scanning server (status: 500)"
    );
}

#[tokio::test]
async fn accepted_without_retry_after_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "/api/scan/v1/abc")
                .set_body_json(serde_json::json!({"status": "pending"})),
        )
        .mount(&server)
        .await;

    let file = sample_file(b"x");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let err = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::MissingRetryAfter));
}

#[tokio::test]
async fn accepted_with_unparseable_retry_after_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "/api/scan/v1/abc")
                .insert_header("Retry-After", "soon")
                .set_body_json(serde_json::json!({"status": "pending"})),
        )
        .mount(&server)
        .await;

    let file = sample_file(b"x");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let err = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::InvalidRetryAfter(v) if v == "soon"));
}

#[tokio::test]
async fn accepted_without_location_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/v1"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Retry-After", "5")
                .set_body_json(serde_json::json!({"status": "pending"})),
        )
        .mount(&server)
        .await;

    let file = sample_file(b"x");
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let err = client
        .submit(file.path(), &ScanMetadata::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::MissingLocation));
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let server = MockServer::start().await;

    // No mocks mounted: the submission must fail on the file read alone.
    let client = ScanClient::new(&server.uri(), "T").unwrap();
    let err = client
        .submit(
            std::path::Path::new("/nonexistent/scanward-test-input"),
            &ScanMetadata::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Io(_)));
}
