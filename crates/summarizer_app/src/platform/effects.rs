use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_warn};
use summarizer_core::{
    FileOutcome, FileReport, Msg, SelectedFile, SubmissionOutcome, SubmitStage, SummaryLength,
};
use summarizer_engine::{
    AnalysisRequest, AnalysisResponse, AnalyzeError, AnalyzeSettings, EngineError, EngineEvent,
    EngineEvents, EngineHandle, FileResult, HealthStatus, RequestId, UploadFile,
};

/// Everything the app loop reacts to.
#[derive(Debug)]
pub enum AppInput {
    Msg(Msg),
    Command(super::ui::command::ConsoleCommand),
    InvalidCommand(String),
    Health(Result<HealthStatus, AnalyzeError>),
    InputClosed,
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: AnalyzeSettings,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_forwarder(events, input_tx);
        Ok(Self { engine })
    }

    pub fn submit(&self, request_id: RequestId, files: Vec<SelectedFile>, length: SummaryLength) {
        let request = AnalysisRequest {
            files: files
                .into_iter()
                .map(|file| UploadFile {
                    name: file.name,
                    content: file.content,
                })
                .collect(),
            summary_type: length.as_str().to_string(),
        };
        self.engine.submit(request_id, request);
    }

    pub fn check_health(&self) {
        self.engine.check_health();
    }
}

fn spawn_event_forwarder(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let input = match event {
                EngineEvent::Progress(progress) => AppInput::Msg(Msg::SubmissionProgress {
                    request_id: progress.request_id,
                    stage: map_stage(progress.stage),
                }),
                EngineEvent::AnalysisCompleted { request_id, result } => {
                    AppInput::Msg(Msg::SubmissionFinished {
                        request_id,
                        outcome: map_outcome(result),
                    })
                }
                EngineEvent::HealthChecked(result) => AppInput::Health(result),
            };
            if input_tx.send(input).is_err() {
                break;
            }
        }
        engine_debug!("Engine event forwarder stopped");
    });
}

fn map_stage(stage: summarizer_engine::Stage) -> SubmitStage {
    match stage {
        summarizer_engine::Stage::Queued => SubmitStage::Queued,
        summarizer_engine::Stage::Uploading => SubmitStage::Uploading,
        summarizer_engine::Stage::Decoding => SubmitStage::Decoding,
    }
}

pub(crate) fn map_outcome(result: Result<AnalysisResponse, AnalyzeError>) -> SubmissionOutcome {
    match result {
        Ok(response) => SubmissionOutcome::Analyzed(
            response.files.into_iter().map(map_file_result).collect(),
        ),
        Err(err) => {
            engine_warn!("Analysis failed: {}", err);
            SubmissionOutcome::Failed {
                message: err.user_message().to_string(),
            }
        }
    }
}

fn map_file_result(file: FileResult) -> FileReport {
    // An empty `error` string does not mark the file as failed.
    let outcome = match file.error {
        Some(error) if !error.is_empty() => FileOutcome::Failed { error },
        _ => FileOutcome::Analyzed {
            text_preview: file.text_preview,
            summary_type: file.summary_type,
            summary: file.summary,
            suggestions: file.suggestions,
        },
    };
    FileReport {
        name: file.name,
        outcome,
    }
}
