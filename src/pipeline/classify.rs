//! Classify the import run's live narration into phases and errors

use once_cell::sync::Lazy;
use regex::Regex;

use super::options::client_from_dump_path;

/// Stage of an import run, inferred from its textual narration.
/// Variant order doubles as progression order; a run never moves
/// backward through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Downloading,
    Extracting,
    Importing,
}

/// Per-line classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A named dump transfer is starting.
    TransferStarted { client: String },
    /// One collapsed unit of download progress.
    ProgressTick,
    /// The run moved into a later phase.
    PhaseChanged(Phase),
    /// A genuine database error worth surfacing.
    CriticalError(String),
    /// Suppressed or unclassified chatter.
    Noise,
}

/// Which error shapes count as fatal.
///
/// The duplicate-key scoping is a heuristic tuned to the wrapped
/// environment's core tables, not a contract of the import tool, so it
/// stays configurable rather than hard-coded.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Table-name substrings that make a duplicate-key violation fatal.
    /// An empty list treats every duplicate-key violation as fatal.
    pub core_table_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            core_table_markers: vec![
                "06_order".to_string(),
                "05_invoice".to_string(),
                "users".to_string(),
            ],
        }
    }
}

static TRANSFER_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^going to import\s+(\S+)").expect("transfer pattern"));

/// unzip's opening banner, e.g. "Archive:  acme_....zip".
static EXTRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*archive:\s").expect("extraction pattern"));

/// Anything that talks about extraction, used to keep such lines out of
/// the download-progress collapse.
static EXTRACTION_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)archive:|extract").expect("extraction mention pattern"));

static SQL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:running|executing)\s+\S+\.sql\b").expect("sql pattern"));

static DUPLICATE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)duplicate entry .* for key").expect("duplicate-key pattern"));

/// mysql's "ERROR 1064 (42000) at line 23 in file: 'x.sql'" shape.
static SQL_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\berror\s+\d+\b.*\bat line\s+\d+\b.*\bin file\b").expect("sql error pattern")
});

/// Known-benign chatter, suppressed unconditionally.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^copying (gs|file)://",
        r"(?i)^operation completed over",
        r"(?i)^average throughput",
        r"(?i)using a password on the command line",
        r"(?i)^(inflating|creating|extracting):",
        r"(?i)^(done|import finished)\.?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern"))
    .collect()
});

/// Single-pass line classifier for one import run.
///
/// Owns the current phase and the latest recorded error; fresh state per
/// run, discarded once the verdict is read. Classification is lossy by
/// design: only phase transitions and recorded errors are user-visible.
#[derive(Debug)]
pub struct ProgressClassifier {
    config: ClassifierConfig,
    phase: Phase,
    last_error: Option<String>,
}

impl ProgressClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            phase: Phase::Downloading,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest recorded critical error; `Some` forces a failing verdict
    /// regardless of the child's exit code.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Classify one line of narration, advancing phase state as needed.
    pub fn observe(&mut self, line: &str) -> LineEvent {
        let trimmed = line.trim();

        // A transfer announcement only counts while still downloading;
        // the phase never moves backward within one run, so a repeat
        // after extraction has begun is just chatter.
        if self.phase == Phase::Downloading {
            if let Some(captures) = TRANSFER_START.captures(trimmed) {
                if let Some(client) = client_from_dump_path(&captures[1]) {
                    return LineEvent::TransferStarted { client };
                }
            }

            if is_progress_chatter(trimmed) {
                return LineEvent::ProgressTick;
            }
        }

        if EXTRACTION.is_match(trimmed) {
            if self.phase < Phase::Extracting {
                self.phase = Phase::Extracting;
                return LineEvent::PhaseChanged(Phase::Extracting);
            }
            return LineEvent::Noise;
        }

        if SQL_RUN.is_match(trimmed) {
            if self.phase < Phase::Importing {
                self.phase = Phase::Importing;
                return LineEvent::PhaseChanged(Phase::Importing);
            }
            return LineEvent::Noise;
        }

        if trimmed.is_empty() || NOISE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
            return LineEvent::Noise;
        }

        if let Some(message) = self.critical_error(trimmed) {
            self.last_error = Some(message.clone());
            return LineEvent::CriticalError(message);
        }

        LineEvent::Noise
    }

    /// Duplicate-key violations count only when scoped to a configured
    /// core table; every other `ERROR ... at line ... in file` does.
    fn critical_error(&self, line: &str) -> Option<String> {
        if DUPLICATE_KEY.is_match(line) {
            let scoped = self.config.core_table_markers.is_empty()
                || self
                    .config
                    .core_table_markers
                    .iter()
                    .any(|marker| line.contains(marker.as_str()));
            return if scoped { Some(line.to_string()) } else { None };
        }

        if SQL_ERROR.is_match(line) {
            return Some(line.to_string());
        }

        None
    }
}

/// Download progress narration: ellipsis runs or bare dot lines, as long
/// as they do not mention extraction.
fn is_progress_chatter(line: &str) -> bool {
    if line.is_empty() || EXTRACTION_MENTION.is_match(line) {
        return false;
    }
    line.contains("...") || line.chars().all(|c| c == '.' || c == ' ')
}
