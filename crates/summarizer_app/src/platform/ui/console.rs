use std::io::Write;
use std::path::PathBuf;

use engine_logging::{engine_error, engine_info};
use summarizer_core::SummaryLength;
use summarizer_engine::write_atomic;

use super::render::UiCommand;

/// Terminal stand-in for the page: prints state changes and writes the
/// results document to disk.
pub struct Console<W: Write> {
    out: W,
    results_path: PathBuf,
    status: Option<String>,
    summary_length: Option<SummaryLength>,
    submit_enabled: Option<bool>,
    loading: Option<String>,
    shown_results: Option<String>,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, results_path: PathBuf) -> Self {
        Self {
            out,
            results_path,
            status: None,
            summary_length: None,
            submit_enabled: None,
            loading: None,
            shown_results: None,
        }
    }

    /// Applies render commands, printing only what changed.
    pub fn apply(&mut self, commands: Vec<UiCommand>) {
        for command in commands {
            match command {
                UiCommand::SetStatus(text) => {
                    if self.status.as_ref() != Some(&text) {
                        self.line(&format!("[status] {text}"));
                        self.status = Some(text);
                    }
                }
                UiCommand::SetSummaryLength(length) => {
                    if self.summary_length != Some(length) {
                        self.line(&format!("[length] {length}"));
                        self.summary_length = Some(length);
                    }
                }
                UiCommand::SetSubmitEnabled(enabled) => {
                    // The initial enabled state is implied.
                    let changed = self.submit_enabled != Some(enabled);
                    let initial_enabled = self.submit_enabled.is_none() && enabled;
                    if changed && !initial_enabled {
                        let state = if enabled { "enabled" } else { "disabled" };
                        self.line(&format!("[submit] {state}"));
                    }
                    self.submit_enabled = Some(enabled);
                }
                UiCommand::SetLoading(loading) => {
                    if loading != self.loading {
                        match &loading {
                            Some(text) => self.line(&format!("[loading] {text}")),
                            None => self.line("[loading] done"),
                        }
                        self.loading = loading;
                    }
                }
                UiCommand::ShowResults { html, text } => {
                    if self.shown_results.as_ref() != Some(&text) {
                        self.show_results(&html, &text);
                        self.shown_results = Some(text);
                    }
                }
                UiCommand::HideResults => {
                    self.shown_results = None;
                }
            }
        }
        let _ = self.out.flush();
    }

    /// Blocking, user-visible message.
    pub fn alert(&mut self, message: &str) {
        self.line(&format!("[alert] {message}"));
        let _ = self.out.flush();
    }

    pub fn print(&mut self, text: &str) {
        self.line(text);
        let _ = self.out.flush();
    }

    fn show_results(&mut self, html: &str, text: &str) {
        let _ = write!(self.out, "{text}");
        match write_atomic(&self.results_path, html) {
            Ok(path) => {
                engine_info!("Wrote results document to {:?}", path);
                self.line(&format!("[results] written to {}", path.display()));
            }
            Err(err) => {
                engine_error!(
                    "Failed to write results document {:?}: {}",
                    self.results_path,
                    err
                );
                self.line(&format!(
                    "[alert] could not write {}: {err}",
                    self.results_path.display()
                ));
            }
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
