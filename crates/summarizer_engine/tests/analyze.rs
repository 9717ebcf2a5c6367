use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use summarizer_engine::{
    AnalysisRequest, AnalyzeSettings, Analyzer, EngineEvent, FailureKind, ProgressSink,
    ReqwestAnalyzer, Stage, StageProgress, UploadFile,
};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress(StageProgress { stage, .. }) => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn analyzer_for(server: &MockServer) -> ReqwestAnalyzer {
    ReqwestAnalyzer::new(AnalyzeSettings::with_api_base(format!("{}/", server.uri())))
        .expect("client")
}

fn request(names: &[&str], summary_type: &str) -> AnalysisRequest {
    AnalysisRequest {
        files: names
            .iter()
            .map(|name| UploadFile {
                name: name.to_string(),
                content: format!("contents of {name}").into_bytes().into(),
            })
            .collect(),
        summary_type: summary_type.to_string(),
    }
}

#[tokio::test]
async fn posts_multipart_and_decodes_results() {
    engine_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"files\"; filename=\"a.pdf\""))
        .and(body_string_contains("contents of a.pdf"))
        .and(body_string_contains("name=\"files\"; filename=\"b.png\""))
        .and(body_string_contains("name=\"summary_type\""))
        .and(body_string_contains("medium"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "ok": true,
                "files": [
                    {"name": "a.pdf", "text_preview": "Intro", "summary_type": "medium",
                     "summary": "• one\n• two", "suggestions": ""},
                    {"name": "b.png", "error": "Failed to process: no text"}
                ]
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let response = analyzer_for(&server)
        .analyze(4, &request(&["a.pdf", "b.png"], "medium"), &sink)
        .await
        .expect("analyze ok");

    assert!(response.ok);
    assert_eq!(response.files.len(), 2);
    assert_eq!(response.files[0].summary.as_deref(), Some("• one\n• two"));
    assert_eq!(response.files[0].error, None);
    assert_eq!(
        response.files[1].error.as_deref(),
        Some("Failed to process: no text")
    );
    assert_eq!(response.files[1].summary, None);
    assert_eq!(sink.stages(), vec![Stage::Uploading, Stage::Decoding]);
}

#[tokio::test]
async fn ok_false_surfaces_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"ok": false, "error": "Empty file list"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(1, &request(&["a.pdf"], "short"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.user_message(), "Empty file list");
}

#[tokio::test]
async fn error_status_prefers_json_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(r#"{"ok": false, "error": "No files provided"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(2, &request(&["a.pdf"], "short"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.user_message(), "No files provided");
}

#[tokio::test]
async fn error_status_without_json_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = analyzer_for(&server)
        .analyze(3, &request(&["a.pdf"], "long"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.user_message(), "Something went wrong");
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = AnalyzeSettings {
        max_response_bytes: 16,
        ..AnalyzeSettings::with_api_base(server.uri())
    };
    let err = ReqwestAnalyzer::new(settings)
        .unwrap()
        .analyze(5, &request(&["a.pdf"], "short"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    // Port 9 (discard) on localhost is assumed closed.
    let analyzer =
        ReqwestAnalyzer::new(AnalyzeSettings::with_api_base("http://127.0.0.1:9")).unwrap();
    let err = analyzer
        .analyze(6, &request(&["a.pdf"], "short"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn health_check_decodes_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"ok": true, "status": "healthy"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let health = analyzer_for(&server).health().await.expect("health ok");
    assert!(health.ok);
    assert_eq!(health.status.as_deref(), Some("healthy"));
}

#[tokio::test]
async fn health_check_reports_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = analyzer_for(&server).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}
