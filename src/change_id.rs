//! Change-Id derivation.
//!
//! The identifier is the git blob id of a small commit-like document built
//! from the index tree, the parent, both identities and the cleaned message,
//! so the value matches `git hash-object -t blob --stdin` over the same input.
use crate::git::{GitError, Repository};
use sha1::{Digest, Sha1};

/// Everything that feeds the Change-Id hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeIdInput {
    pub tree: String,
    pub parent: Option<String>,
    pub author: String,
    pub committer: String,
    pub message: String,
}

impl ChangeIdInput {
    /// Collect metadata from the repository for an already-cleaned message.
    pub fn collect(repo: &dyn Repository, message: String) -> Result<Self, GitError> {
        Ok(Self {
            tree: repo.write_tree()?,
            parent: repo.head_commit()?,
            author: repo.author_ident()?,
            committer: repo.committer_ident()?,
            message,
        })
    }

    fn document(&self) -> String {
        let mut doc = format!("tree {}\n", self.tree);
        if let Some(parent) = &self.parent {
            doc.push_str(&format!("parent {parent}\n"));
        }
        doc.push_str(&format!("author {}\n", self.author));
        doc.push_str(&format!("committer {}\n", self.committer));
        doc.push('\n');
        doc.push_str(&self.message);
        doc
    }

    /// `I` followed by the 40-hex blob id.
    pub fn change_id(&self) -> String {
        format!("I{}", git_blob_id(self.document().as_bytes()))
    }
}

/// Object id git assigns to `bytes` stored as a blob.
pub fn git_blob_id(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", bytes.len()).as_bytes());
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
