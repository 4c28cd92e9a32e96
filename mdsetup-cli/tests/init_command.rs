//! End-to-end tests for `mdsetup init` and top-level help.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

fn mdsetup_cmd(work: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mdsetup"));
    cmd.current_dir(work);
    cmd
}

#[test]
fn init_creates_project_skeleton() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    mdsetup_cmd(tmp.path())
        .args(["init", "-o", "sim"])
        .assert()
        .success()
        .stdout(contains("22 directories"));

    for dir in ["sim/Prep", "sim/Analysis", "sim/Scripts", "sim/Equil/md16", "sim/Prod/mdprod"] {
        tmp.child(dir).assert(predicate::path::is_dir());
    }
    tmp.child("sim/Equil/min16").assert(predicate::path::missing());
    tmp.child("init.log").assert(predicate::path::is_file());
}

#[test]
fn init_defaults_to_amber_directory() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    mdsetup_cmd(tmp.path())
        .args(["init", "-l", "custom.log"])
        .assert()
        .success();
    tmp.child("amber/Equil/min1").assert(predicate::path::is_dir());
    tmp.child("custom.log").assert(predicate::path::is_file());
    tmp.child("init.log").assert(predicate::path::missing());
}

#[test]
fn init_is_idempotent() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("sim/Prod/mdprod/mdprod.in").write_str("keep\n").unwrap();
    for _ in 0..2 {
        mdsetup_cmd(tmp.path()).args(["init", "-o", "sim"]).assert().success();
    }
    tmp.child("sim/Prod/mdprod/mdprod.in").assert("keep\n");
}

#[test]
fn help_lists_subcommands() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    mdsetup_cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("init").and(contains("create")).and(contains("solvate")));
}

#[test]
fn unknown_verbosity_is_rejected() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    mdsetup_cmd(tmp.path())
        .args(["init", "-v", "loud"])
        .assert()
        .failure()
        .stderr(contains("loud"));
}
