//! Shared test fixtures: probe texts and stub import tools
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

/// Probe text as the real import tool prints it: header, numbered dump
/// menu, rejection of the sentinel.
pub const SAMPLE_MENU: &str = "\
Which customer dump should be imported?
 1) gs://henk-db-dumps/acme_2025-09-30T11:00:00.zip
 2) gs://henk-db-dumps/beta_2025-10-01T09:30:00.zip
'henk-probe' is an invalid selection
";

/// Write an executable shell script standing in for the external import
/// tool and return its path.
pub fn stub_tool(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("stub-import-tool");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stub that serves the sample menu to a probe and plays back
/// `narration` (then exits with `exit_code`) for a real selection.
pub fn menu_stub(dir: &TempDir, narration: &str, exit_code: i32) -> PathBuf {
    let body = format!(
        r#"read -r choice
if [ "$choice" = "henk-probe" ]; then
  cat <<'MENU'
Which customer dump should be imported?
 1) gs://henk-db-dumps/acme_2025-09-30T11:00:00.zip
 2) gs://henk-db-dumps/beta_2025-10-01T09:30:00.zip
'henk-probe' is an invalid selection
MENU
  exit 1
fi
cat <<'NARRATION'
{narration}
NARRATION
exit {exit_code}"#
    );
    stub_tool(dir, &body)
}
