//! Non-committal menu harvest from the external import tool

use std::io::Write;
use std::process::{Command, Stdio};

/// Command invoked for every probe and import run, unless overridden
/// through `HENK_IMPORT_COMMAND`.
pub const DEFAULT_IMPORT_COMMAND: &str = "cluster-import-tool";

/// First input line fed to the tool when probing. Menu selections are
/// numeric, so this can never match a real option: the tool prints its
/// menu, rejects the selection, and exits without importing anything.
pub const PROBE_SENTINEL: &str = "henk-probe";

/// Resolve the external import tool command for this invocation.
pub fn import_command() -> String {
    std::env::var("HENK_IMPORT_COMMAND").unwrap_or_else(|_| DEFAULT_IMPORT_COMMAND.to_string())
}

/// Run the tool with `extra_args`, answer its menu prompt with the
/// sentinel, and return whatever it printed on either stream, carriage
/// returns stripped.
///
/// A tool that fails to start, prints nothing, or exits non-zero still
/// yields text (possibly empty) rather than an error; unusable output
/// surfaces downstream as a menu with zero parsed options.
pub fn probe_menu(program: &str, extra_args: &[String]) -> String {
    let spawned = Command::new(program)
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(_) => return String::new(),
    };

    if let Some(mut stdin) = child.stdin.take() {
        // The tool may exit before reading; a broken pipe is fine.
        let _ = writeln!(stdin, "{}", PROBE_SENTINEL);
    }

    match child.wait_with_output() {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            text.replace('\r', "")
        }
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_yields_empty_text() {
        let text = probe_menu("henk-test-no-such-tool", &[]);
        assert!(text.is_empty());
    }

    #[test]
    fn test_default_command_is_used_without_override() {
        // Serialized with nothing: this test only reads the fallback.
        if std::env::var_os("HENK_IMPORT_COMMAND").is_none() {
            assert_eq!(import_command(), DEFAULT_IMPORT_COMMAND);
        }
    }
}
