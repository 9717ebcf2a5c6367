use crate::{BulletBlock, SubmitPhase, SummaryLength};

pub const INITIAL_STATUS: &str = "Drop files here or pick them to select";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status_label: String,
    pub selected_names: Vec<String>,
    pub summary_length: SummaryLength,
    pub phase: SubmitPhase,
    pub submit_enabled: bool,
    /// Loading indicator text; `None` hides the indicator.
    pub loading: Option<String>,
    pub results_visible: bool,
    pub results: Vec<FileBlockView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlockView {
    pub name: String,
    pub body: FileBodyView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBodyView {
    Error(String),
    Analyzed {
        preview: String,
        summary_label: String,
        summary: BulletBlock,
        suggestions: BulletBlock,
    },
}
