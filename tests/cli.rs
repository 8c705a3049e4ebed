//! End-to-end tests of the grove binary

mod common;

use assert_cmd::Command;
use common::test_fixtures::RootFixture;
use predicates::prelude::*;

fn grove(root: &RootFixture) -> Command {
    let mut cmd = Command::cargo_bin("grove").unwrap();
    cmd.env_remove("GROVE_ROOT").arg("--root").arg(root.path());
    cmd
}

#[test]
fn test_root_prints_primary_root() {
    let root = RootFixture::new();

    grove(&root)
        .arg("root")
        .assert()
        .success()
        .stdout(format!("{}\n", root.path().display()));
}

#[test]
fn test_root_all_prints_every_root() {
    let first = RootFixture::new();
    let second = RootFixture::new();

    grove(&first)
        .arg("--root")
        .arg(second.path())
        .args(["root", "--all"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n{}\n",
            first.path().display(),
            second.path().display()
        ));
}

#[test]
fn test_list_prints_relative_paths() {
    let root = RootFixture::new();
    root.add_repo("github.com/motemen/ghq", ".git");
    root.add_repo("github.com/atom/atom", ".git");

    grove(&root)
        .arg("list")
        .assert()
        .success()
        .stdout("github.com/atom/atom\ngithub.com/motemen/ghq\n");
}

#[test]
fn test_list_query_and_json() {
    let root = RootFixture::new();
    root.add_repo("github.com/motemen/ghq", ".git");
    root.add_repo("github.com/atom/atom", ".git");

    grove(&root)
        .args(["list", "ghq", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rel_path\": \"github.com/motemen/ghq\""))
        .stdout(predicate::str::contains("atom").not());
}

#[test]
fn test_get_existing_repository_is_skipped() {
    let root = RootFixture::new();
    root.add_repo("github.com/motemen/ghq", ".git");

    grove(&root)
        .args(["--no-color", "get", "https://github.com/motemen/ghq"])
        .assert()
        .success();
}

#[test]
fn test_get_invalid_url_fails() {
    let root = RootFixture::new();

    grove(&root)
        .args(["--no-color", "get", "https://github.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_get_unknown_vcs_fails() {
    let root = RootFixture::new();

    grove(&root)
        .args(["--no-color", "get", "--vcs", "bzr", "https://example.com/a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bzr"));
}
