use crate::git::GitError;
use std::path::PathBuf;

/// Failures that stop the hook.
///
/// Skips are not errors; see `SkipReason`.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("commit title is {len} characters long; the limit is {max}")]
    TitleTooLong { len: usize, max: usize },

    /// Repository metadata for the Change-Id could not be resolved.
    #[error("could not compute Change-Id")]
    ChangeId(#[source] GitError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HookError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HookError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
