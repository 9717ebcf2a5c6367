use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    AppState, Effect, Msg, SubmissionOutcome, EMPTY_SELECTION_ALERT, FALLBACK_ERROR_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesDropped(files) | Msg::FilesPicked(files) => {
            engine_debug!("Selection replaced with {} file(s)", files.len());
            state.replace_selection(files);
            Vec::new()
        }
        Msg::SummaryLengthChanged(length) => {
            state.set_summary_length(length);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.in_flight_request().is_some() {
                // Submit control is disabled while a request is outstanding.
                return (state, Vec::new());
            }
            if state.selection().is_empty() {
                return (state, vec![Effect::ShowAlert(EMPTY_SELECTION_ALERT.to_string())]);
            }

            let files = state.selection().files().to_vec();
            let summary_length = state.summary_length();
            let request_id = state.begin_submission();
            engine_info!(
                "Submitting request {} with {} file(s), summary_type={}",
                request_id,
                files.len(),
                summary_length
            );
            vec![Effect::SubmitAnalysis {
                request_id,
                files,
                summary_length,
            }]
        }
        Msg::SubmissionProgress { request_id, stage } => {
            if !state.apply_stage(request_id, stage) {
                engine_debug!("Ignoring progress for stale request {}", request_id);
            }
            Vec::new()
        }
        Msg::SubmissionFinished {
            request_id,
            outcome,
        } => {
            if !state.finish_submission(request_id, &outcome) {
                engine_warn!("Ignoring completion for unknown request {}", request_id);
                return (state, Vec::new());
            }
            match outcome {
                SubmissionOutcome::Analyzed(reports) => {
                    engine_info!("Request {} rendered {} file(s)", request_id, reports.len());
                    Vec::new()
                }
                SubmissionOutcome::Failed { message } => {
                    engine_warn!("Request {} failed: {}", request_id, message);
                    let message = if message.is_empty() {
                        FALLBACK_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    };
                    vec![Effect::ShowAlert(message)]
                }
            }
        }
    };

    (state, effects)
}
