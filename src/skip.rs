//! Conditions under which the hook deliberately leaves the message alone.
use serde::Serialize;

/// Title prefixes written by `git commit --fixup` and `--squash`.
const AUTOSQUASH_PREFIXES: [&str; 3] = ["fixup!", "squash!", "amend!"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackagingBranch {
    /// `upstream` or `upstream/*`: imported upstream sources.
    Upstream,
    /// `pristine-tar`: tarball deltas.
    PristineTar,
}

impl PackagingBranch {
    pub fn classify(branch: &str) -> Option<Self> {
        if branch == "upstream" || branch.starts_with("upstream/") {
            Some(PackagingBranch::Upstream)
        } else if branch == "pristine-tar" {
            Some(PackagingBranch::PristineTar)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum SkipReason {
    Disabled,
    EmptyMessage,
    AutosquashCommit,
    PackagingBranch {
        branch: String,
        kind: PackagingBranch,
    },
    HasChangeId,
}

pub fn is_autosquash_title(title: &str) -> bool {
    AUTOSQUASH_PREFIXES
        .iter()
        .any(|prefix| title.starts_with(prefix))
}
