//! Parse the import tool's dump menu into structured records

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use super::timefmt::relative_age;

/// One selectable dump target from the import tool's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOption {
    /// The tool's own menu number; never re-assigned.
    pub sequence: u32,
    /// Customer name, taken from the dump filename.
    pub client: String,
    /// Raw `YYYY-MM-DDTHH:MM:SS` timestamp from the filename.
    pub timestamp_raw: String,
    /// The timestamp's calendar fields interpreted as UTC.
    pub epoch_seconds: i64,
    /// Age label computed against "now" at parse time.
    pub relative_label: String,
}

/// The dump the user (or a direct `--client` match) settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSelection {
    pub sequence: u32,
    pub client: String,
    pub relative_label: String,
}

impl From<&ImportOption> for ImportSelection {
    fn from(option: &ImportOption) -> Self {
        Self {
            sequence: option.sequence,
            client: option.client.clone(),
            relative_label: option.relative_label.clone(),
        }
    }
}

/// A numbered menu line: "  3) gs://bucket/client_....zip" or "3. ...".
static OPTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)[.)]\s+(.+)$").expect("option line pattern"));

/// Dump-path token inside a menu line, capturing the path without the
/// `.zip` suffix and the embedded timestamp.
static DUMP_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S+_(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}))\.zip").expect("dump token pattern")
});

/// Extract every numbered menu line carrying a dump-path token, in input
/// order. Other lines are skipped silently; an empty result tells the
/// caller the menu was unreadable and passthrough mode is in order.
pub fn parse_options(probe_text: &str, now_seconds: i64) -> Vec<ImportOption> {
    probe_text
        .lines()
        .filter_map(|line| parse_option_line(line, now_seconds))
        .collect()
}

fn parse_option_line(line: &str, now_seconds: i64) -> Option<ImportOption> {
    let numbered = OPTION_LINE.captures(line)?;
    let sequence: u32 = numbered[1].parse().ok()?;
    if sequence == 0 {
        return None;
    }

    let token = DUMP_TOKEN.captures(&numbered[2])?;
    let client = client_from_dump_path(&token[1])?;
    let timestamp_raw = token[2].to_string();

    // Calendar fields are taken as UTC; no timezone conversion.
    let epoch_seconds = NaiveDateTime::parse_from_str(&timestamp_raw, "%Y-%m-%dT%H:%M:%S")
        .ok()?
        .and_utc()
        .timestamp();

    Some(ImportOption {
        sequence,
        client,
        relative_label: relative_age(epoch_seconds, now_seconds),
        timestamp_raw,
        epoch_seconds,
    })
}

/// Client name embedded in a dump path: the filename's leading segment
/// up to its first underscore. Returns `None` for an empty name.
pub(crate) fn client_from_dump_path(path: &str) -> Option<String> {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(".zip").unwrap_or(file);
    let client = match stem.find('_') {
        Some(idx) => &stem[..idx],
        None => stem,
    };
    if client.is_empty() {
        None
    } else {
        Some(client.to_string())
    }
}

/// Most recent dump first. Stable, so same-timestamp dumps keep their
/// menu order; the tool's own numbering is left untouched either way.
pub fn sort_by_recency(options: &mut [ImportOption]) {
    options.sort_by_key(|option| std::cmp::Reverse(option.epoch_seconds));
}

/// First line of the probe text usable as a prompt header: non-empty,
/// not a numbered option, not the sentinel echoed back, not the tool's
/// invalid-selection notice. Absence just means no header is shown.
pub fn extract_header<'a>(probe_text: &'a str, sentinel: &str) -> Option<&'a str> {
    probe_text.lines().map(str::trim).find(|line| {
        !line.is_empty()
            && !OPTION_LINE.is_match(line)
            && !line.contains(sentinel)
            && !is_invalid_selection_notice(line)
    })
}

fn is_invalid_selection_notice(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("invalid selection") || lower.contains("invalid choice")
}
