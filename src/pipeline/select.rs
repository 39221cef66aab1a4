//! Settling on one dump target: direct name match or an interactive picker

use thiserror::Error;

use super::options::{ImportOption, ImportSelection};

/// Failures while settling on a dump target.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Direct-match mode asked for a client absent from the parsed menu.
    /// Fatal: the user asked for a specific target, so there is no
    /// fallback to the interactive or passthrough paths.
    #[error("no dump available for client '{client}'")]
    NoMatch { client: String },

    /// The interactive prompt itself failed (terminal went away).
    #[error("selection prompt failed: {0}")]
    Prompt(String),
}

/// One strategy for letting the user pick a dump interactively.
///
/// `Ok(None)` is a cancelled selection, distinct from failure; the
/// runner turns it into its own exit status without starting a child.
pub trait DumpPicker {
    fn pick(
        &self,
        header: Option<&str>,
        options: &[ImportOption],
    ) -> Result<Option<ImportSelection>, SelectError>;
}

/// Case-insensitive, whitespace-trimmed exact match; first hit wins.
pub fn match_client(
    options: &[ImportOption],
    client: &str,
) -> Result<ImportSelection, SelectError> {
    let wanted = client.trim();
    options
        .iter()
        .find(|option| option.client.eq_ignore_ascii_case(wanted))
        .map(ImportSelection::from)
        .ok_or_else(|| SelectError::NoMatch {
            client: wanted.to_string(),
        })
}
