//! Shared test infrastructure for integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Fixed identities and dates so Change-Ids are reproducible across runs.
const GIT_ENV: [(&str, &str); 8] = [
    ("GIT_AUTHOR_NAME", "A U Thor"),
    ("GIT_AUTHOR_EMAIL", "author@example.com"),
    ("GIT_AUTHOR_DATE", "1700000000 +0000"),
    ("GIT_COMMITTER_NAME", "C O Mitter"),
    ("GIT_COMMITTER_EMAIL", "committer@example.com"),
    ("GIT_COMMITTER_DATE", "1700000000 +0000"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
];

/// Throwaway git repository with a commit message file.
pub struct GitFixture {
    dir: TempDir,
}

impl GitFixture {
    /// Create a fresh repository on `main`, or `None` when git is missing.
    pub fn init() -> Option<Self> {
        let available = Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success());
        if !available {
            eprintln!("Skipping: git not available");
            return None;
        }
        let fixture = Self {
            dir: TempDir::new().expect("create temp repo"),
        };
        fixture.git(&["init", "-q"]);
        fixture.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        Some(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn message_path(&self) -> PathBuf {
        self.root().join(".git/COMMIT_EDITMSG")
    }

    pub fn write_message(&self, contents: &str) {
        std::fs::write(self.message_path(), contents).expect("write commit message");
    }

    pub fn read_message(&self) -> String {
        std::fs::read_to_string(self.message_path()).expect("read commit message")
    }

    fn command(&self, program: &str) -> Command {
        let mut command = Command::new(program);
        command.current_dir(self.root()).envs(GIT_ENV);
        command
    }

    /// Run git and return trimmed stdout, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = self.command("git").args(args).output().expect("spawn git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim_end().to_string()
    }

    /// `git hash-object -t blob --stdin` over `input`.
    pub fn hash_object(&self, input: &str) -> String {
        let mut child = self
            .command("git")
            .args(["hash-object", "-t", "blob", "--stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn git hash-object");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("write hash-object input");
        let output = child.wait_with_output().expect("wait for hash-object");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run the built `ctrail` binary inside the repository.
    pub fn ctrail(&self, args: &[&str]) -> Output {
        self.command(env!("CARGO_BIN_EXE_ctrail"))
            .args(args)
            .output()
            .expect("spawn ctrail")
    }
}
