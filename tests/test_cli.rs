//! CLI argument parsing and end-to-end runs against a stub import tool

use assert_cmd::Command;
use clap::Parser;
use henk::cli::{Cli, Commands};
use predicates::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

fn henk() -> Command {
    Command::cargo_bin("henk").unwrap()
}

#[test]
fn test_import_parses_client_flag() {
    let cli = Cli::parse_from(["henk", "import", "--client", "acme"]);
    match cli.command {
        Commands::Import { client, extra_args } => {
            assert_eq!(client.as_deref(), Some("acme"));
            assert!(extra_args.is_empty());
        }
    }
}

#[test]
fn test_import_collects_passthrough_args_including_flags() {
    let cli = Cli::parse_from(["henk", "import", "--client", "acme", "--skip-cache", "fast"]);
    match cli.command {
        Commands::Import { extra_args, .. } => {
            assert_eq!(extra_args, vec!["--skip-cache", "fast"]);
        }
    }
}

#[test]
fn test_no_color_flag_disables_colors() {
    let cli = Cli::parse_from(["henk", "import", "--no-color"]);
    assert!(!cli.colors_enabled());
}

#[test]
fn test_unreadable_menu_falls_back_to_passthrough_with_raw_exit_code() {
    let dir = TempDir::new().unwrap();
    // No menu at all: the probe harvests nothing, so the runner hands
    // over to the tool's own prompt and propagates its code verbatim.
    let stub = common::stub_tool(&dir, "exit 7");

    henk()
        .args(["import", "--no-color"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("could not read the dump menu"));
}

#[test]
fn test_direct_match_runs_import_and_classifies_phases() {
    let dir = TempDir::new().unwrap();
    let narration = "\
Going to import gs://henk-db-dumps/acme_2025-09-30T11:00:00.zip
Copying gs://henk-db-dumps/acme_2025-09-30T11:00:00.zip...
...
Archive:  acme_2025-09-30T11:00:00.zip
inflating: acme/dump.sql
Running seed.sql
Done";
    let stub = common::menu_stub(&dir, narration, 0);

    henk()
        .args(["import", "--no-color", "--client", "acme"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .success()
        .stdout(predicate::str::contains("Importing acme"))
        .stdout(predicate::str::contains("downloading acme"))
        .stdout(predicate::str::contains("extracting"))
        .stdout(predicate::str::contains("importing"))
        .stdout(predicate::str::contains("import complete"));
}

#[test]
fn test_direct_match_is_case_insensitive_end_to_end() {
    let dir = TempDir::new().unwrap();
    let stub = common::menu_stub(&dir, "Done", 0);

    henk()
        .args(["import", "--no-color", "--client", "ACME"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .success()
        .stdout(predicate::str::contains("Importing acme"));
}

#[test]
fn test_classifier_error_forces_failure_despite_clean_exit() {
    let dir = TempDir::new().unwrap();
    let narration = "\
Running seed.sql
ERROR 1062 (23000) at line 42 in file: 'seed.sql': Duplicate entry '7' for key '06_order.PRIMARY'
Done";
    let stub = common::menu_stub(&dir, narration, 0);

    henk()
        .args(["import", "--no-color", "--client", "acme"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate entry"))
        .stderr(predicate::str::contains("database errors"));
}

#[test]
fn test_child_exit_code_passes_through_when_output_is_clean() {
    let dir = TempDir::new().unwrap();
    let stub = common::menu_stub(&dir, "Running seed.sql", 3);

    henk()
        .args(["import", "--no-color", "--client", "acme"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("exited with an error"));
}

#[test]
fn test_missing_client_is_a_fatal_no_match() {
    let dir = TempDir::new().unwrap();
    let stub = common::menu_stub(&dir, "Done", 0);

    henk()
        .args(["import", "--no-color", "--client", "ghost"])
        .env("HENK_IMPORT_COMMAND", &stub)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no dump available for client 'ghost'"));
}
