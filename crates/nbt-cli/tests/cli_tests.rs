//! Integration tests for the `nbt` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the dump and get
//! subcommands through the actual binary. Input documents are built with
//! `nbt-core` and piped in via stdin or written to temporary files.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;
use nbt_core::{to_bytes, CompoundTag, ListTag, NamedTag, Tag, TAG_STRING};
use predicates::prelude::*;

/// Helper: a small level document.
fn level_bytes() -> Vec<u8> {
    let mut version = CompoundTag::new();
    version.add("Name", "17w13b");
    version.add("Id", 1343i32);

    let mut data = CompoundTag::new();
    data.add("Version", version);
    data.add("LevelName", "World");
    data.add(
        "Tags",
        ListTag::new(TAG_STRING, vec![Tag::from("a"), Tag::from("b")]),
    );

    let mut root = CompoundTag::new();
    root.add("Data", data);
    to_bytes(&NamedTag::new("", root)).unwrap()
}

/// Helper: a per-test path in the temp directory.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nbt-cli-test-{}-{name}", std::process::id()))
}

fn nbt() -> Command {
    Command::cargo_bin("nbt").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Dump subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dump_stdin_to_stdout() {
    nbt()
        .arg("dump")
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("TAG_Named: \"\"\n  TAG_Compound\n"))
        .stdout(predicate::str::contains(
            "            Name:\n              TAG_String: \"17w13b\"",
        ))
        .stdout(predicate::str::contains("TAG_Int: 1343"));
}

#[test]
fn dump_file_to_file() {
    let input = temp_path("dump-in.nbt");
    let output = temp_path("dump-out.txt");
    std::fs::write(&input, level_bytes()).unwrap();
    let _ = std::fs::remove_file(&output);

    nbt()
        .arg("dump")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output).expect("output file must exist");
    assert!(content.contains("TAG_String: \"World\""));

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn dump_json() {
    nbt()
        .args(["dump", "--json"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"":{"Data":{"Version":{"Name":"17w13b","Id":1343},"LevelName":"World","Tags":["a","b"]}}}"#,
        ));
}

#[test]
fn dump_pretty_json() {
    nbt()
        .args(["dump", "--json", "--pretty"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::contains("\n        \"Name\": \"17w13b\""));
}

#[test]
fn dump_pretty_requires_json() {
    nbt()
        .args(["dump", "--pretty"])
        .write_stdin(level_bytes())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--json"));
}

#[test]
fn dump_empty_input_fails() {
    nbt()
        .arg("dump")
        .write_stdin(Vec::<u8>::new())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode NBT document"));
}

#[test]
fn dump_truncated_input_prints_what_was_read() {
    let bytes = level_bytes();
    nbt()
        .arg("dump")
        .write_stdin(bytes[..bytes.len() - 12].to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("17w13b"));
}

#[test]
fn dump_missing_file_fails() {
    nbt()
        .args(["dump", "-i", "/nonexistent/level.nbt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Get subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_single_path() {
    nbt()
        .args(["get", "-p", ".Data.Version.Name"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(".Data.Version.Name\nTAG_String: \"17w13b\"\n");
}

#[test]
fn get_paths_in_sorted_order() {
    nbt()
        .args(["get", "-p", ".Data.Version.Id", "-p", ".Data.LevelName"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(".Data.LevelName\nTAG_String: \"World\"\n.Data.Version.Id\nTAG_Int: 1343\n");
}

#[test]
fn get_list_element() {
    nbt()
        .args(["get", "--path", ".Data.Tags.1"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::contains("TAG_String: \"b\""));
}

#[test]
fn get_missing_path_prints_placeholder() {
    nbt()
        .args(["get", "-p", ".Data.Nope"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::contains("Tag.Error: \"[not loaded]\""));
}

#[test]
fn get_with_stats() {
    nbt()
        .args(["get", "-p", ".Data.LevelName", "--stats"])
        .write_stdin(level_bytes())
        .assert()
        .success()
        .stdout(predicate::str::contains("decoded: 1, descended: 2, skipped: 1"));
}

#[test]
fn get_from_file() {
    let input = temp_path("get-in.nbt");
    std::fs::write(&input, level_bytes()).unwrap();

    nbt()
        .args(["get", "-p", ".Data.Version"])
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("TAG_Compound\n  Name:\n"));

    let _ = std::fs::remove_file(&input);
}

#[test]
fn get_requires_a_path() {
    nbt()
        .arg("get")
        .write_stdin(level_bytes())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--path"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    nbt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NBT"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("get"));
}

#[test]
fn unknown_subcommand_fails() {
    nbt()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
