use std::fmt;
use std::str::FromStr;

use crate::selection::{SelectedFile, Selection};
use crate::view_model::{AppViewModel, FileBlockView, FileBodyView, INITIAL_STATUS};

pub type RequestId = u64;

/// Requested summary verbosity, sent as the `summary_type` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|length| length.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown summary length '{wanted}' (short, medium, long)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Progress of the in-flight request as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Queued,
    Uploading,
    Decoding,
}

/// One per-file result; failure and success are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub name: String,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Failed {
        error: String,
    },
    Analyzed {
        text_preview: Option<String>,
        summary_type: Option<String>,
        summary: Option<String>,
        suggestions: Option<String>,
    },
}

/// How a submission ended, already reduced to what the UI needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Analyzed(Vec<FileReport>),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    summary_length: SummaryLength,
    file_count: usize,
    stage: SubmitStage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderedResults {
    summary_length: SummaryLength,
    reports: Vec<FileReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selection: Selection,
    status_label: Option<String>,
    summary_length: SummaryLength,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    results: Option<RenderedResults>,
    results_visible: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status_label: self
                .status_label
                .clone()
                .unwrap_or_else(|| INITIAL_STATUS.to_string()),
            selected_names: self.selection.names().map(ToOwned::to_owned).collect(),
            summary_length: self.summary_length,
            phase: self.phase(),
            submit_enabled: self.in_flight.is_none(),
            loading: self.in_flight.as_ref().map(loading_text),
            results_visible: self.results_visible,
            results: self
                .results
                .as_ref()
                .filter(|_| self.results_visible)
                .map(build_file_blocks)
                .unwrap_or_default(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        if self.in_flight.is_some() {
            SubmitPhase::Submitting
        } else {
            SubmitPhase::Idle
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn summary_length(&self) -> SummaryLength {
        self.summary_length
    }

    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|flight| flight.request_id)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_selection(&mut self, files: Vec<SelectedFile>) {
        self.selection.replace(files);
        if let Some(label) = self.selection.label() {
            self.status_label = Some(label);
        }
        self.mark_dirty();
    }

    pub(crate) fn set_summary_length(&mut self, length: SummaryLength) {
        if self.summary_length != length {
            self.summary_length = length;
            self.mark_dirty();
        }
    }

    /// Enters `Submitting` and returns the id for the new request.
    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(InFlight {
            request_id,
            summary_length: self.summary_length,
            file_count: self.selection.len(),
            stage: SubmitStage::Queued,
        });
        self.results_visible = false;
        self.mark_dirty();
        request_id
    }

    pub(crate) fn apply_stage(&mut self, request_id: RequestId, stage: SubmitStage) -> bool {
        match self.in_flight.as_mut() {
            Some(flight) if flight.request_id == request_id => {
                if flight.stage != stage {
                    flight.stage = stage;
                    self.dirty = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Leaves `Submitting` for the given request. Returns `false` when the
    /// completion does not belong to the in-flight request.
    pub(crate) fn finish_submission(
        &mut self,
        request_id: RequestId,
        outcome: &SubmissionOutcome,
    ) -> bool {
        let flight = match self.in_flight.take() {
            Some(flight) if flight.request_id == request_id => flight,
            other => {
                self.in_flight = other;
                return false;
            }
        };

        match outcome {
            SubmissionOutcome::Analyzed(reports) => {
                self.results = Some(RenderedResults {
                    summary_length: flight.summary_length,
                    reports: reports.clone(),
                });
                self.results_visible = true;
            }
            SubmissionOutcome::Failed { .. } => {
                self.results_visible = false;
            }
        }
        self.mark_dirty();
        true
    }
}

fn loading_text(flight: &InFlight) -> String {
    match flight.stage {
        SubmitStage::Queued => "Preparing request...".to_string(),
        SubmitStage::Uploading => format!("Uploading {} file(s)...", flight.file_count),
        SubmitStage::Decoding => "Reading summaries...".to_string(),
    }
}

fn build_file_blocks(results: &RenderedResults) -> Vec<FileBlockView> {
    results
        .reports
        .iter()
        .map(|report| FileBlockView {
            name: report.name.clone(),
            body: match &report.outcome {
                FileOutcome::Failed { error } => FileBodyView::Error(error.clone()),
                FileOutcome::Analyzed {
                    text_preview,
                    summary_type,
                    summary,
                    suggestions,
                } => FileBodyView::Analyzed {
                    preview: text_preview.clone().unwrap_or_default(),
                    summary_label: format!(
                        "{} summary:",
                        summary_type
                            .as_deref()
                            .unwrap_or(results.summary_length.as_str())
                    ),
                    summary: crate::format_bullets(summary.as_deref()),
                    suggestions: crate::format_bullets(suggestions.as_deref()),
                },
            },
        })
        .collect()
}
