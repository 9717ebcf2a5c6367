use crate::{RequestId, SelectedFile, SummaryLength};

pub const EMPTY_SELECTION_ALERT: &str = "Please choose at least one file.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Blocking, user-visible message.
    ShowAlert(String),
    /// Send exactly one analyze request.
    SubmitAnalysis {
        request_id: RequestId,
        files: Vec<SelectedFile>,
        summary_length: SummaryLength,
    },
}
