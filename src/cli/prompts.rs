//! Interactive dump pickers built on dialoguer

use comfy_table::{presets::NOTHING, Table};
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input};

use crate::pipeline::{DumpPicker, ImportOption, ImportSelection, SelectError};

const DEFAULT_PROMPT: &str = "Select a dump to import";

/// Probe the terminal for an interactive capability.
///
/// An attended ANSI terminal gets the fuzzy finder; a dumb but
/// interactive terminal gets the numbered menu; `None` means this
/// session cannot prompt at all and the caller should fall back to the
/// import tool's own prompt.
pub fn detect_picker() -> Option<Box<dyn DumpPicker>> {
    if !console::user_attended_stderr() || !Term::stderr().is_term() {
        return None;
    }

    let dumb_term = std::env::var("TERM")
        .map(|term| term == "dumb")
        .unwrap_or(false);
    if dumb_term {
        Some(Box::new(NumberedPicker))
    } else {
        Some(Box::new(FuzzyPicker))
    }
}

/// Fuzzy finder over the dump list; Esc backs out.
pub struct FuzzyPicker;

impl DumpPicker for FuzzyPicker {
    fn pick(
        &self,
        header: Option<&str>,
        options: &[ImportOption],
    ) -> Result<Option<ImportSelection>, SelectError> {
        let items = aligned_rows(options);
        let picked = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(header.unwrap_or(DEFAULT_PROMPT))
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|err| SelectError::Prompt(err.to_string()))?;

        Ok(picked.map(|index| ImportSelection::from(&options[index])))
    }
}

/// Plain numbered menu for terminals the fuzzy finder cannot drive.
/// An empty answer, `q`, or anything unparseable backs out rather than
/// looping.
pub struct NumberedPicker;

impl DumpPicker for NumberedPicker {
    fn pick(
        &self,
        header: Option<&str>,
        options: &[ImportOption],
    ) -> Result<Option<ImportSelection>, SelectError> {
        if let Some(header) = header {
            println!("{}", header);
        }

        let mut table = Table::new();
        table.load_preset(NOTHING);
        table.set_header(vec!["#", "Client", "Age"]);
        for (index, option) in options.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                option.client.clone(),
                option.relative_label.clone(),
            ]);
        }
        println!("{}", table);

        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Select a dump (1-{}, empty to cancel)", options.len()))
            .allow_empty(true)
            .interact_text()
            .map_err(|err| SelectError::Prompt(err.to_string()))?;

        let answer = answer.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let choice = match answer.parse::<usize>() {
            Ok(number) if (1..=options.len()).contains(&number) => number,
            _ => return Ok(None),
        };
        Ok(Some(ImportSelection::from(&options[choice - 1])))
    }
}

/// Listing rows with the client column padded so ages line up; the
/// sequence number stays hidden from the picker.
fn aligned_rows(options: &[ImportOption]) -> Vec<String> {
    let width = options
        .iter()
        .map(|option| option.client.len())
        .max()
        .unwrap_or(0);
    options
        .iter()
        .map(|option| format!("{:<width$}  {}", option.client, option.relative_label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(client: &str, relative_label: &str) -> ImportOption {
        ImportOption {
            sequence: 1,
            client: client.to_string(),
            timestamp_raw: "2025-01-01T00:00:00".to_string(),
            epoch_seconds: 0,
            relative_label: relative_label.to_string(),
        }
    }

    #[test]
    fn test_rows_align_on_the_longest_client() {
        let rows = aligned_rows(&[
            option("acme", "2 days ago"),
            option("longclient", "just now"),
        ]);
        assert_eq!(rows[0], "acme        2 days ago");
        assert_eq!(rows[1], "longclient  just now");
    }
}
