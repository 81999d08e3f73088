//! Repository metadata lookups backed by the `git` executable.
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to run git {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// What the hook needs from the repository it runs in.
pub trait Repository {
    /// Tree object of the current index (`git write-tree`).
    fn write_tree(&self) -> Result<String, GitError>;
    /// `HEAD` commit, or `None` on an unborn branch.
    fn head_commit(&self) -> Result<Option<String>, GitError>;
    fn author_ident(&self) -> Result<String, GitError>;
    fn committer_ident(&self) -> Result<String, GitError>;
    /// Short branch name, or `None` with a detached `HEAD`.
    fn current_branch(&self) -> Result<Option<String>, GitError>;
    fn config_get(&self, key: &str) -> Result<Option<String>, GitError>;
    fn config_bool(&self, key: &str) -> Result<Option<bool>, GitError>;
    fn hooks_dir(&self) -> Result<PathBuf, GitError>;
}

/// `Repository` implementation that shells out to `git` in `workdir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn output(&self, args: &[&str]) -> Result<Output, GitError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit.
    fn read(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(GitError::Failed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(stdout_line(&output))
    }

    /// Like `read`, but exit status 1 with empty stderr means "not set".
    fn read_optional(&self, args: &[&str]) -> Result<Option<String>, GitError> {
        let output = self.output(args)?;
        if output.status.success() {
            return Ok(Some(stdout_line(&output)));
        }
        if output.status.code() == Some(1) && output.stderr.is_empty() {
            return Ok(None);
        }
        Err(GitError::Failed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

impl Repository for GitCli {
    fn write_tree(&self) -> Result<String, GitError> {
        self.read(&["write-tree"])
    }

    fn head_commit(&self) -> Result<Option<String>, GitError> {
        self.read_optional(&["rev-parse", "--verify", "--quiet", "HEAD^0"])
    }

    fn author_ident(&self) -> Result<String, GitError> {
        self.read(&["var", "GIT_AUTHOR_IDENT"])
    }

    fn committer_ident(&self) -> Result<String, GitError> {
        self.read(&["var", "GIT_COMMITTER_IDENT"])
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        self.read_optional(&["symbolic-ref", "--quiet", "--short", "HEAD"])
    }

    fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        self.read_optional(&["config", "--get", key])
    }

    fn config_bool(&self, key: &str) -> Result<Option<bool>, GitError> {
        let value = self.read_optional(&["config", "--bool", "--get", key])?;
        Ok(value.map(|value| value == "true"))
    }

    fn hooks_dir(&self) -> Result<PathBuf, GitError> {
        let raw = self.read(&["rev-parse", "--git-path", "hooks"])?;
        let path = Path::new(&raw);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.workdir.join(path))
        }
    }
}

/// In-memory repository for unit tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRepo {
    pub(crate) branch: Option<String>,
    pub(crate) parent: Option<String>,
    pub(crate) config: std::collections::BTreeMap<String, String>,
    pub(crate) fail_metadata: bool,
}

#[cfg(test)]
impl FakeRepo {
    fn metadata(&self, value: &str) -> Result<String, GitError> {
        if self.fail_metadata {
            return Err(GitError::Failed {
                command: "write-tree".to_string(),
                stderr: "fatal: not a git repository".to_string(),
            });
        }
        Ok(value.to_string())
    }
}

#[cfg(test)]
impl Repository for FakeRepo {
    fn write_tree(&self) -> Result<String, GitError> {
        self.metadata("4b825dc642cb6eb9a060e54bf8d69288fbee4904")
    }

    fn head_commit(&self) -> Result<Option<String>, GitError> {
        Ok(self.parent.clone())
    }

    fn author_ident(&self) -> Result<String, GitError> {
        self.metadata("A U Thor <author@example.com> 1700000000 +0000")
    }

    fn committer_ident(&self) -> Result<String, GitError> {
        self.metadata("C O Mitter <committer@example.com> 1700000000 +0000")
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        Ok(self.branch.clone())
    }

    fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        Ok(self.config.get(key).cloned())
    }

    fn config_bool(&self, key: &str) -> Result<Option<bool>, GitError> {
        Ok(self.config.get(key).map(|value| value == "true"))
    }

    fn hooks_dir(&self) -> Result<PathBuf, GitError> {
        Ok(PathBuf::from(".git/hooks"))
    }
}
