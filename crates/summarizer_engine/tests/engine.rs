use std::sync::Arc;
use std::time::Duration;

use summarizer_engine::{
    AnalysisRequest, AnalysisResponse, AnalyzeError, AnalyzeSettings, Analyzer, EngineEvent,
    EngineHandle, HealthStatus, ProgressSink, RequestId, Stage, StageProgress, UploadFile,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct CannedAnalyzer;

#[async_trait::async_trait]
impl Analyzer for CannedAnalyzer {
    async fn analyze(
        &self,
        _request_id: RequestId,
        request: &AnalysisRequest,
        _sink: &dyn ProgressSink,
    ) -> Result<AnalysisResponse, AnalyzeError> {
        Ok(AnalysisResponse {
            ok: true,
            error: None,
            files: request
                .files
                .iter()
                .map(|file| summarizer_engine::FileResult {
                    name: file.name.clone(),
                    error: None,
                    text_preview: None,
                    summary_type: Some(request.summary_type.clone()),
                    summary: Some("- done".to_string()),
                    suggestions: None,
                })
                .collect(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, AnalyzeError> {
        Ok(HealthStatus {
            ok: true,
            status: Some("healthy".to_string()),
        })
    }
}

fn single_file_request() -> AnalysisRequest {
    AnalysisRequest {
        files: vec![UploadFile {
            name: "notes.pdf".to_string(),
            content: b"%PDF-1.4".to_vec().into(),
        }],
        summary_type: "short".to_string(),
    }
}

#[test]
fn submit_reports_queued_then_completion() {
    let (engine, events) = EngineHandle::with_analyzer(Arc::new(CannedAnalyzer)).unwrap();
    engine.submit(11, single_file_request());

    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::Progress(StageProgress {
            request_id: 11,
            stage: Stage::Queued,
        }))
    );
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::AnalysisCompleted { request_id, result }) => {
            assert_eq!(request_id, 11);
            let response = result.expect("canned ok");
            assert_eq!(response.files[0].name, "notes.pdf");
            assert_eq!(response.files[0].summary_type.as_deref(), Some("short"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn health_check_is_reported_as_event() {
    let (engine, events) = EngineHandle::with_analyzer(Arc::new(CannedAnalyzer)).unwrap();
    engine.check_health();

    match events.recv_timeout(WAIT) {
        Some(EngineEvent::HealthChecked(Ok(status))) => assert!(status.ok),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_round_trip_against_http_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"ok": true, "files": [{"name": "notes.pdf", "summary": "x"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let (engine, events) =
        EngineHandle::new(AnalyzeSettings::with_api_base(server.uri())).unwrap();
    engine.submit(1, single_file_request());

    let collected = tokio::task::spawn_blocking(move || {
        let mut collected = Vec::new();
        while let Some(event) = events.recv_timeout(WAIT) {
            let done = matches!(event, EngineEvent::AnalysisCompleted { .. });
            collected.push(event);
            if done {
                break;
            }
        }
        collected
    })
    .await
    .unwrap();

    let stages: Vec<Stage> = collected
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress(progress) => Some(progress.stage),
            _ => None,
        })
        .collect();
    assert_eq!(stages, vec![Stage::Queued, Stage::Uploading, Stage::Decoding]);
    match collected.last() {
        Some(EngineEvent::AnalysisCompleted { request_id: 1, result: Ok(response) }) => {
            assert_eq!(response.files[0].summary.as_deref(), Some("x"));
        }
        other => panic!("unexpected final event {other:?}"),
    }
}
