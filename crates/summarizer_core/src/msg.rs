use crate::{RequestId, SelectedFile, SubmissionOutcome, SubmitStage, SummaryLength};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files dropped onto the drop target.
    FilesDropped(Vec<SelectedFile>),
    /// Files chosen through the file picker.
    FilesPicked(Vec<SelectedFile>),
    /// User changed the summary length control.
    SummaryLengthChanged(SummaryLength),
    /// User pressed the submit control.
    SubmitClicked,
    /// Engine progress for the in-flight request.
    SubmissionProgress {
        request_id: RequestId,
        stage: SubmitStage,
    },
    /// Engine completion for a request, successful or not.
    SubmissionFinished {
        request_id: RequestId,
        outcome: SubmissionOutcome,
    },
}
