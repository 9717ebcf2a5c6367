//! Summarizer core: pure state machine, bullet heuristic and view-model helpers.
mod bullets;
mod effect;
mod msg;
mod selection;
mod state;
mod update;
mod view_model;

pub use bullets::{format_bullets, BulletBlock, NOT_AVAILABLE};
pub use effect::{Effect, EMPTY_SELECTION_ALERT, FALLBACK_ERROR_MESSAGE};
pub use msg::Msg;
pub use selection::{SelectedFile, Selection};
pub use state::{
    AppState, FileOutcome, FileReport, RequestId, SubmissionOutcome, SubmitPhase, SubmitStage,
    SummaryLength,
};
pub use update::update;
pub use view_model::{AppViewModel, FileBlockView, FileBodyView, INITIAL_STATUS};
