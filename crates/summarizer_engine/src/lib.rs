//! Summarizer engine: talks to the analysis service and persists files.
mod analyze;
mod engine;
mod persist;
mod types;

pub use analyze::{
    build_form, interpret_analysis, AnalyzeSettings, Analyzer, ChannelProgressSink, ProgressSink,
    ReqwestAnalyzer, DEFAULT_API_BASE,
};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use persist::{ensure_dir, write_atomic, AtomicFileWriter, PersistError};
pub use types::{
    AnalysisRequest, AnalysisResponse, AnalyzeError, EngineEvent, FailureKind, FileResult,
    HealthStatus, RequestId, Stage, StageProgress, UploadFile, DEFAULT_ERROR_MESSAGE,
};
