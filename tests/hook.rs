//! End-to-end tests for the `ctrail` commit-msg hook against real git
//! repositories.

mod common;

use common::GitFixture;

const MSG: &str = ".git/COMMIT_EDITMSG";

fn expected_change_id(fixture: &GitFixture, parent: Option<&str>, cleaned: &str) -> String {
    let mut input = format!("tree {}\n", fixture.git(&["write-tree"]));
    if let Some(parent) = parent {
        input.push_str(&format!("parent {parent}\n"));
    }
    input.push_str(&format!(
        "author {}\ncommitter {}\n\n{cleaned}",
        fixture.git(&["var", "GIT_AUTHOR_IDENT"]),
        fixture.git(&["var", "GIT_COMMITTER_IDENT"])
    ));
    format!("I{}", fixture.hash_object(&input))
}

#[test]
fn run_injects_change_id_and_fixes_bug_reference() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.write_message("Fix crash\n\nbug:4321\n# Please enter the commit message\n");

    let output = fixture.ctrail(&["run", MSG]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let id = expected_change_id(&fixture, None, "Fix crash\n\nbug:4321");
    assert_eq!(
        fixture.read_message(),
        format!("Fix crash\n\nBug: 4321\n\nChange-Id: {id}\n")
    );
}

#[test]
fn change_id_includes_parent_commit() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.git(&["commit", "-q", "--allow-empty", "-m", "Initial commit"]);
    let parent = fixture.git(&["rev-parse", "HEAD"]);
    fixture.write_message("Add parser\n\nParses things.\n");

    let preview = fixture.ctrail(&["change-id", MSG]);
    assert!(preview.status.success());
    let previewed = String::from_utf8_lossy(&preview.stdout).trim().to_string();
    assert_eq!(
        previewed,
        expected_change_id(&fixture, Some(&parent), "Add parser\n\nParses things.")
    );
    assert_eq!(fixture.read_message(), "Add parser\n\nParses things.\n");

    assert!(fixture.ctrail(&["run", MSG]).status.success());
    assert_eq!(
        fixture.read_message(),
        format!("Add parser\n\nParses things.\n\nChange-Id: {previewed}\n")
    );
}

#[test]
fn second_run_is_a_no_op() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.write_message("Title\n\nBody\n\nBug: 1234\nReviewed-by: A <a@b.c>\n");
    assert!(fixture.ctrail(&["run", MSG]).status.success());
    let first = fixture.read_message();
    assert!(first.contains("Bug: 1234\n"));
    assert_eq!(first.matches("Change-Id: I").count(), 1);

    let output = fixture.ctrail(&["run", MSG, "--json"]);
    assert!(output.status.success());
    assert_eq!(fixture.read_message(), first);
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["skipped"]["reason"], "has-change-id");
}

#[test]
fn fixup_commit_is_left_alone() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.write_message("fixup! oops\n");
    let output = fixture.ctrail(&["run", MSG]);
    assert!(output.status.success());
    assert_eq!(fixture.read_message(), "fixup! oops\n");
}

#[test]
fn packaging_branch_is_left_alone() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.git(&["symbolic-ref", "HEAD", "refs/heads/pristine-tar"]);
    fixture.write_message("Add tarball delta\n");
    assert!(fixture.ctrail(&["run", MSG]).status.success());
    assert_eq!(fixture.read_message(), "Add tarball delta\n");
}

#[test]
fn git_config_can_disable_the_hook() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.git(&["config", "gerrit.createChangeId", "false"]);
    fixture.write_message("Title\n");
    assert!(fixture.ctrail(&["run", MSG]).status.success());
    assert_eq!(fixture.read_message(), "Title\n");
}

#[test]
fn long_title_warns_and_over_long_title_fails() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    fixture.write_message(&format!("{}\n", "w".repeat(85)));
    let output = fixture.ctrail(&["run", MSG]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("longer than 80 characters"));
    assert!(fixture.read_message().contains("Change-Id: I"));

    let original = format!("{}\n\nBody\n", "f".repeat(101));
    fixture.write_message(&original);
    let output = fixture.ctrail(&["run", MSG]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("the limit is 100"));
    assert_eq!(fixture.read_message(), original);
}

#[test]
fn config_file_changes_priority_keys() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    let config = fixture.root().join("ctrail.json");
    std::fs::write(&config, r#"{ "priority_keys": ["Signed-off-by"] }"#).expect("config");
    fixture.write_message("Title\n\nSigned-off-by: A <a@b.c>\nAcked-by: B <b@c.d>\n");
    let config_arg = config.display().to_string();
    assert!(fixture
        .ctrail(&["run", MSG, "--config", &config_arg])
        .status
        .success());
    let lines: Vec<String> = fixture.read_message().lines().map(str::to_string).collect();
    assert_eq!(lines[2], "Signed-off-by: A <a@b.c>");
    assert!(lines[3].starts_with("Change-Id: I"));
    assert_eq!(lines[4], "Acked-by: B <b@c.d>");
}

#[test]
fn install_writes_executable_hook_once() {
    let Some(fixture) = GitFixture::init() else {
        return;
    };
    let output = fixture.ctrail(&["install"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let hook = fixture.root().join(".git/hooks/commit-msg");
    let script = std::fs::read_to_string(&hook).expect("hook written");
    assert!(script.starts_with("#!/bin/sh\n"));
    assert!(script.contains("run \"$1\""));
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&hook).expect("hook metadata").permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    assert_eq!(fixture.ctrail(&["install"]).status.code(), Some(1));
    assert!(fixture.ctrail(&["install", "--force"]).status.success());
}
