use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use chrono::Utc;
use engine_logging::{engine_info, engine_warn};
use summarizer_core::{update, AppState, Effect, Msg, SelectedFile, SubmitPhase};
use summarizer_engine::AnalyzeSettings;

use super::cli::Cli;
use super::effects::{AppInput, EffectRunner};
use super::logging;
use super::settings::{self, ClientSettings};
use super::ui::command::{parse_command, ConsoleCommand, HELP};
use super::ui::console::Console;
use super::ui::render;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(&cli.log_options())?;

    let persisted = settings::load_settings(&cli.settings);
    if cli.save_api_base {
        let updated = ClientSettings {
            api_base: cli.api_base.clone(),
        };
        settings::save_settings(&cli.settings, &updated)?;
    }
    let api_base = settings::resolve_api_base(cli.api_base.as_deref(), &persisted);
    engine_info!("Using analysis service at {}", api_base);

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(AnalyzeSettings::with_api_base(api_base), input_tx.clone())
        .context("failed to start the request engine")?;
    let console = Console::new(io::stdout(), cli.results.clone());
    let mut driver = AppDriver::new(runner, console);

    if cli.check {
        driver.runner.check_health();
        return match input_rx.recv() {
            Ok(AppInput::Health(result)) => driver.report_health(result),
            _ => bail!("health check did not complete"),
        };
    }

    driver.dispatch(Msg::SummaryLengthChanged(cli.length));

    if !cli.files.is_empty() {
        return run_once(driver, input_rx, cli.files);
    }

    spawn_stdin_reader(input_tx);
    driver.console.print(HELP);
    driver.render_now();
    while let Ok(input) = input_rx.recv() {
        driver.handle(input);
        if driver.should_exit() {
            break;
        }
    }
    Ok(())
}

/// Picks the given files, submits them once and waits for the outcome.
fn run_once(
    mut driver: AppDriver<io::Stdout>,
    input_rx: mpsc::Receiver<AppInput>,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let files = read_files(&files)?;
    driver.dispatch(Msg::FilesPicked(files));
    driver.dispatch(Msg::SubmitClicked);

    while driver.state.phase() == SubmitPhase::Submitting {
        match input_rx.recv() {
            Ok(input) => driver.handle(input),
            Err(_) => bail!("request engine stopped before the request finished"),
        }
    }

    if driver.state.view().results_visible {
        Ok(())
    } else {
        bail!("no summaries were produced")
    }
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let input = match parse_command(&line) {
                Ok(Some(command)) => AppInput::Command(command),
                Ok(None) => continue,
                Err(message) => AppInput::InvalidCommand(message),
            };
            if input_tx.send(input).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppInput::InputClosed);
    });
}

fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<SelectedFile>> {
    paths
        .iter()
        .map(|path| {
            let content =
                fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(SelectedFile::new(name, content))
        })
        .collect()
}

struct AppDriver<W: Write> {
    state: AppState,
    runner: EffectRunner,
    console: Console<W>,
    quit_requested: bool,
}

impl<W: Write> AppDriver<W> {
    fn new(runner: EffectRunner, console: Console<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            console,
            quit_requested: false,
        }
    }

    /// Quit waits for an outstanding request; requests are never cancelled.
    fn should_exit(&self) -> bool {
        self.quit_requested && self.state.phase() == SubmitPhase::Idle
    }

    fn handle(&mut self, input: AppInput) {
        match input {
            AppInput::Msg(msg) => self.dispatch(msg),
            AppInput::Command(command) => self.handle_command(command),
            AppInput::InvalidCommand(message) => self.console.alert(&message),
            AppInput::Health(result) => {
                if let Err(err) = self.report_health(result) {
                    self.console.alert(&err.to_string());
                }
            }
            AppInput::InputClosed => self.quit_requested = true,
        }
    }

    fn handle_command(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Drop(paths) => {
                if let Some(files) = self.read_or_alert(&paths) {
                    self.dispatch(Msg::FilesDropped(files));
                }
            }
            ConsoleCommand::Pick(paths) => {
                if let Some(files) = self.read_or_alert(&paths) {
                    self.dispatch(Msg::FilesPicked(files));
                }
            }
            ConsoleCommand::Length(length) => self.dispatch(Msg::SummaryLengthChanged(length)),
            ConsoleCommand::Submit => self.dispatch(Msg::SubmitClicked),
            ConsoleCommand::Status => self.print_status(),
            ConsoleCommand::Health => self.runner.check_health(),
            ConsoleCommand::Help => self.console.print(HELP),
            ConsoleCommand::Quit => {
                if self.state.phase() == SubmitPhase::Submitting {
                    self.console
                        .print("Waiting for the running request to finish before exiting.");
                }
                self.quit_requested = true;
            }
        }
    }

    fn read_or_alert(&mut self, paths: &[PathBuf]) -> Option<Vec<SelectedFile>> {
        match read_files(paths) {
            Ok(files) => Some(files),
            Err(err) => {
                engine_warn!("Selection event ignored: {:#}", err);
                self.console.alert(&format!("{err:#}"));
                None
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.render_now();
        }
        for effect in effects {
            match effect {
                Effect::ShowAlert(message) => self.console.alert(&message),
                Effect::SubmitAnalysis {
                    request_id,
                    files,
                    summary_length,
                } => self.runner.submit(request_id, files, summary_length),
            }
        }
    }

    fn render_now(&mut self) {
        let view = self.state.view();
        let generated_at = Utc::now().to_rfc3339();
        self.console.apply(render::render(&view, &generated_at));
    }

    fn print_status(&mut self) {
        let view = self.state.view();
        let selected = if view.selected_names.is_empty() {
            "(none)".to_string()
        } else {
            view.selected_names.join(", ")
        };
        let phase = match view.phase {
            SubmitPhase::Idle => "idle",
            SubmitPhase::Submitting => "submitting",
        };
        self.console.print(&format!(
            "Selection: {selected} | Length: {} | State: {phase} | Results: {}",
            view.summary_length,
            if view.results_visible { "shown" } else { "hidden" }
        ));
    }

    fn report_health(
        &mut self,
        result: Result<summarizer_engine::HealthStatus, summarizer_engine::AnalyzeError>,
    ) -> anyhow::Result<()> {
        match result {
            Ok(status) if status.ok => {
                let detail = status.status.unwrap_or_else(|| "ok".to_string());
                self.console.print(&format!("[health] service is {detail}"));
                Ok(())
            }
            Ok(_) => bail!("service reported itself unhealthy"),
            Err(err) => bail!("health check failed: {err}"),
        }
    }
}
