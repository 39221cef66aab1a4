//! Import pipeline - probe, parse, select, run, classify

mod classify;
mod options;
mod probe;
mod runner;
mod select;
mod timefmt;

pub use classify::{ClassifierConfig, LineEvent, Phase, ProgressClassifier};
pub use options::{extract_header, parse_options, sort_by_recency, ImportOption, ImportSelection};
pub use probe::{import_command, probe_menu, DEFAULT_IMPORT_COMMAND, PROBE_SENTINEL};
pub use runner::{ImportRunner, RunOutcome};
pub use select::{match_client, DumpPicker, SelectError};
pub use timefmt::relative_age;
