use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

use crate::analyze::{AnalyzeSettings, Analyzer, ChannelProgressSink, ProgressSink, ReqwestAnalyzer};
use crate::{AnalysisRequest, AnalyzeError, EngineEvent, RequestId, Stage, StageProgress};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] AnalyzeError),
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    CheckHealth,
}

/// Sending half of the engine: commands go to a background thread that owns
/// the tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half of the engine: progress and completion events.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: AnalyzeSettings) -> Result<(Self, EngineEvents), EngineError> {
        let analyzer = ReqwestAnalyzer::new(settings)?;
        Self::with_analyzer(Arc::new(analyzer))
    }

    pub fn with_analyzer(
        analyzer: Arc<dyn Analyzer>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(analyzer.as_ref(), command, event_tx).await;
                });
            }
            engine_debug!("Engine command channel closed; shutting down runtime");
            runtime.shutdown_background();
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn submit(&self, request_id: RequestId, request: AnalysisRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Submit {
                request_id,
                request,
            })
            .is_err()
        {
            engine_warn!("Engine stopped; request {} dropped", request_id);
        }
    }

    pub fn check_health(&self) {
        if self.cmd_tx.send(EngineCommand::CheckHealth).is_err() {
            engine_warn!("Engine stopped; health check dropped");
        }
    }
}

impl EngineEvents {
    /// Blocks until an event arrives; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            sink.emit(EngineEvent::Progress(StageProgress {
                request_id,
                stage: Stage::Queued,
            }));
            let result = analyzer.analyze(request_id, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
        }
        EngineCommand::CheckHealth => {
            let result = analyzer.health().await;
            let _ = event_tx.send(EngineEvent::HealthChecked(result));
        }
    }
}
