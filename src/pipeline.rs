//! The commit-msg hook: skip checks, title guard, Change-Id injection and
//! issue-reference cleanup, in that order.
//!
//! Each mutating stage persists its result before the next one runs, and the
//! title guard runs before any of them so a rejected title leaves the file
//! untouched.
use crate::change_id::ChangeIdInput;
use crate::config::HookConfig;
use crate::error::HookError;
use crate::git::Repository;
use crate::message::{
    check_title, fixup_tags, has_change_id, inject_change_id, normalize_lines, stripspace,
    Injection, Message, TitleVerdict,
};
use crate::skip::{is_autosquash_title, PackagingBranch, SkipReason};
use crate::util::write_atomic;
use serde::Serialize;
use std::path::Path;

/// What a hook run did, for logging and `--json` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Title length when it exceeded the soft limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_title: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    pub tags_rewritten: bool,
}

impl HookReport {
    fn skip(mut self, reason: SkipReason) -> Self {
        tracing::debug!(?reason, "leaving commit message unchanged");
        self.skipped = Some(reason);
        self
    }
}

/// Read `path` and normalize it with the configured comment character.
pub fn load_message(path: &Path, config: &HookConfig) -> Result<Message, HookError> {
    let raw = std::fs::read_to_string(path).map_err(|err| HookError::io("read", path, err))?;
    let comment_char = config.resolve_comment_char(&raw);
    Ok(Message::from_lines(normalize_lines(&raw, comment_char)))
}

fn persist(path: &Path, message: &Message) -> Result<(), HookError> {
    write_atomic(path, message.render().as_bytes()).map_err(|err| HookError::io("write", path, err))
}

/// Change-Id the hook would inject into `message`, or `None` when the
/// message is blank.
pub fn compute_change_id(
    message: &Message,
    repo: &dyn Repository,
) -> Result<Option<String>, HookError> {
    if message.is_blank() {
        return Ok(None);
    }
    let input =
        ChangeIdInput::collect(repo, stripspace(message.lines())).map_err(HookError::ChangeId)?;
    Ok(Some(input.change_id()))
}

/// Run every stage against the message file at `path`.
pub fn run_hook(
    path: &Path,
    repo: &dyn Repository,
    config: &HookConfig,
) -> Result<HookReport, HookError> {
    let mut report = HookReport::default();
    if !config.enabled {
        return Ok(report.skip(SkipReason::Disabled));
    }

    let message = load_message(path, config)?;
    let Some(title) = message.title() else {
        return Ok(report.skip(SkipReason::EmptyMessage));
    };
    if is_autosquash_title(title) {
        return Ok(report.skip(SkipReason::AutosquashCommit));
    }
    if let Some(branch) = repo.current_branch()? {
        if let Some(kind) = PackagingBranch::classify(&branch) {
            return Ok(report.skip(SkipReason::PackagingBranch { branch, kind }));
        }
    }

    if let TitleVerdict::TooLong { len } = check_title(&message, config.title_limits())? {
        report.long_title = Some(len);
    }

    if has_change_id(message.lines()) {
        return Ok(report.skip(SkipReason::HasChangeId));
    }
    let Some(change_id) = compute_change_id(&message, repo)? else {
        return Ok(report.skip(SkipReason::EmptyMessage));
    };

    let injected = match inject_change_id(&message, &change_id, &config.priority()) {
        Injection::Inserted(injected) => injected,
        Injection::AlreadyPresent => return Ok(report.skip(SkipReason::HasChangeId)),
        Injection::EmptyMessage => return Ok(report.skip(SkipReason::EmptyMessage)),
    };
    persist(path, &injected)?;
    tracing::info!(%change_id, "added Change-Id trailer");
    report.change_id = Some(change_id);

    let fixed = fixup_tags(&injected);
    if fixed != injected {
        persist(path, &fixed)?;
        tracing::info!("normalized issue reference trailers");
        report.tags_rewritten = true;
    }
    Ok(report)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
