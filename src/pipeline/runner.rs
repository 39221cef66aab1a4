//! End-to-end import workflow: probe, parse, pick, run, classify

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::utils::{create_spinner, Styler};

use super::classify::{ClassifierConfig, LineEvent, Phase, ProgressClassifier};
use super::options::{extract_header, parse_options, sort_by_recency};
use super::probe::{probe_menu, PROBE_SENTINEL};
use super::select::{match_client, DumpPicker};

/// How one invocation of the import workflow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Import ran and both the child and the classifier were clean.
    Completed,
    /// The user backed out of the picker; no child was started.
    Cancelled,
    /// The classifier recorded a critical error. Overrides the child's
    /// exit code, which may well be zero.
    ImportFailed { last_error: String },
    /// The child exited non-zero with clean classified output, or a
    /// passthrough run failed; its code is propagated verbatim.
    ChildFailed { code: i32 },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed => 0,
            RunOutcome::Cancelled => 130,
            RunOutcome::ImportFailed { .. } => 1,
            RunOutcome::ChildFailed { code } => *code,
        }
    }
}

/// Orchestrates one discovery-and-import cycle against the external
/// import tool. All state lives for a single `run` call.
pub struct ImportRunner<'a> {
    program: String,
    extra_args: Vec<String>,
    classifier_config: ClassifierConfig,
    styler: &'a Styler,
}

impl<'a> ImportRunner<'a> {
    pub fn new(
        program: String,
        extra_args: Vec<String>,
        classifier_config: ClassifierConfig,
        styler: &'a Styler,
    ) -> Self {
        Self {
            program,
            extra_args,
            classifier_config,
            styler,
        }
    }

    /// Probe the tool's menu, settle on a dump (direct match when
    /// `client` is given, otherwise via `picker`), then run the real
    /// import with its narration classified.
    ///
    /// An unreadable menu or a missing picker degrades to passthrough:
    /// the tool's own prompt, unfiltered, its exit code untouched.
    pub fn run(
        &self,
        client: Option<&str>,
        picker: Option<&dyn DumpPicker>,
    ) -> Result<RunOutcome> {
        let spinner = create_spinner("Probing available dumps...");
        let probe_text = probe_menu(&self.program, &self.extra_args);
        spinner.finish_and_clear();

        let mut options = parse_options(&probe_text, Utc::now().timestamp());
        if options.is_empty() {
            self.styler
                .warn("could not read the dump menu; handing over to the import tool's own prompt");
            return self.run_passthrough();
        }

        let selection = match client {
            Some(name) => match_client(&options, name)?,
            None => {
                sort_by_recency(&mut options);
                let header = extract_header(&probe_text, PROBE_SENTINEL);
                let picker = match picker {
                    Some(picker) => picker,
                    None => {
                        self.styler.warn(
                            "no interactive terminal; handing over to the import tool's own prompt",
                        );
                        return self.run_passthrough();
                    }
                };
                match picker.pick(header, &options)? {
                    Some(selection) => selection,
                    None => {
                        self.styler.cancelled("Import cancelled.");
                        return Ok(RunOutcome::Cancelled);
                    }
                }
            }
        };

        self.styler
            .announce(&selection.client, &selection.relative_label);
        self.run_classified(selection.sequence)
    }

    /// Degraded path: let the tool drive its own interactive prompt.
    /// No classification; the child's exit code is the verdict.
    fn run_passthrough(&self) -> Result<RunOutcome> {
        let status = Command::new(&self.program)
            .args(&self.extra_args)
            .status()
            .with_context(|| format!("failed to start import tool '{}'", self.program))?;

        if status.success() {
            Ok(RunOutcome::Completed)
        } else {
            Ok(RunOutcome::ChildFailed {
                code: status.code().unwrap_or(1),
            })
        }
    }

    /// The real import: answer the menu with the chosen sequence number
    /// and classify the narration as it streams.
    fn run_classified(&self, sequence: u32) -> Result<RunOutcome> {
        let mut child = Command::new(&self.program)
            .args(&self.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start import tool '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            // The tool may already be past its prompt; a broken pipe
            // here only means the answer was not needed.
            let _ = writeln!(stdin, "{}", sequence);
        }

        let stdout = child
            .stdout
            .take()
            .context("import tool stdout was not captured")?;

        let mut classifier = ProgressClassifier::new(self.classifier_config.clone());
        let mut renderer = EventRenderer::new(self.styler);

        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            renderer.render(&classifier.observe(line.trim_end_matches('\r')));
        }

        // Database errors often land on stderr; fold it through the same
        // classifier once the live stream closes, before the verdict.
        let mut stderr_text = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut stderr_text);
        }
        for line in stderr_text.lines() {
            renderer.render(&classifier.observe(line.trim_end_matches('\r')));
        }
        renderer.finish();

        let status = child.wait().context("failed to wait for the import tool")?;

        // Two separate failure signals, combined by OR: the tool can
        // exit zero while its output reports a database error.
        if let Some(message) = classifier.last_error() {
            self.styler.failure("import finished with database errors");
            return Ok(RunOutcome::ImportFailed {
                last_error: message.to_string(),
            });
        }
        if !status.success() {
            self.styler.failure("import tool exited with an error");
            return Ok(RunOutcome::ChildFailed {
                code: status.code().unwrap_or(1),
            });
        }

        self.styler.success("import complete");
        Ok(RunOutcome::Completed)
    }
}

/// Maps classified events onto the terminal, collapsing download
/// progress into a dot run that is closed before any other output.
struct EventRenderer<'a> {
    styler: &'a Styler,
    dots_pending: bool,
}

impl<'a> EventRenderer<'a> {
    fn new(styler: &'a Styler) -> Self {
        Self {
            styler,
            dots_pending: false,
        }
    }

    fn render(&mut self, event: &LineEvent) {
        match event {
            LineEvent::TransferStarted { client } => {
                self.break_dots();
                self.styler.phase(&format!("downloading {}", client));
            }
            LineEvent::ProgressTick => {
                self.styler.tick();
                self.dots_pending = true;
            }
            LineEvent::PhaseChanged(Phase::Extracting) => {
                self.break_dots();
                self.styler.phase("extracting");
            }
            LineEvent::PhaseChanged(Phase::Importing) => {
                self.break_dots();
                self.styler.phase("importing");
            }
            LineEvent::PhaseChanged(Phase::Downloading) => {}
            LineEvent::CriticalError(message) => {
                self.break_dots();
                self.styler.error_line(message);
            }
            LineEvent::Noise => {}
        }
    }

    /// Close a pending dot run; also called at stream end.
    fn break_dots(&mut self) {
        if self.dots_pending {
            println!();
            self.dots_pending = false;
        }
    }

    fn finish(&mut self) {
        self.break_dots();
    }
}
