//! Hook configuration.
//!
//! Defaults are layered with an optional JSON file and the repository's git
//! config, then validated once so the message stages can take plain values.
use crate::git::Repository;
use crate::message::{PriorityKeys, TitleLimits};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Marker value that asks for git's automatic comment character.
pub const COMMENT_CHAR_AUTO: &str = "auto";

/// Candidates git tries, in order, for `core.commentChar=auto`.
const AUTO_COMMENT_CANDIDATES: &str = "#;@!$%^&|:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    /// When false every run is a no-op.
    pub enabled: bool,
    /// Single character, or `"auto"`.
    pub comment_char: String,
    /// Keys that stay above the injected Change-Id.
    pub priority_keys: Vec<String>,
    pub title_warn_len: usize,
    pub title_max_len: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        let limits = TitleLimits::default();
        Self {
            enabled: true,
            comment_char: "#".to_string(),
            priority_keys: vec!["Bug".to_string(), "Issue".to_string(), "Test".to_string()],
            title_warn_len: limits.warn,
            title_max_len: limits.max,
        }
    }
}

impl HookConfig {
    pub fn priority(&self) -> PriorityKeys {
        PriorityKeys::new(self.priority_keys.iter().cloned())
    }

    pub fn title_limits(&self) -> TitleLimits {
        TitleLimits {
            warn: self.title_warn_len,
            max: self.title_max_len,
        }
    }

    /// Comment character for `raw`, resolving `auto` against its lines.
    pub fn resolve_comment_char(&self, raw: &str) -> char {
        if self.comment_char != COMMENT_CHAR_AUTO {
            return self.comment_char.chars().next().unwrap_or('#');
        }
        AUTO_COMMENT_CANDIDATES
            .chars()
            .find(|candidate| !raw.lines().any(|line| line.starts_with(*candidate)))
            .unwrap_or('#')
    }
}

/// Load a JSON config file; missing fields fall back to defaults.
pub fn load_config_file(path: &Path) -> Result<HookConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: HookConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

/// Apply the git settings the hook honors on top of `config`.
pub fn apply_git_config(config: &mut HookConfig, repo: &dyn Repository) -> Result<()> {
    if let Some(enabled) = repo
        .config_bool("gerrit.createChangeId")
        .context("read gerrit.createChangeId")?
    {
        config.enabled = enabled;
    }
    if let Some(comment_char) = repo
        .config_get("core.commentChar")
        .context("read core.commentChar")?
    {
        config.comment_char = comment_char;
    }
    Ok(())
}

/// Defaults, then `file`, then git config; the result is validated.
pub fn load_config(repo: &dyn Repository, file: Option<&Path>) -> Result<HookConfig> {
    let mut config = match file {
        Some(path) => load_config_file(path)?,
        None => HookConfig::default(),
    };
    apply_git_config(&mut config, repo)?;
    validate_config(&config)?;
    tracing::debug!(?config, "loaded hook config");
    Ok(config)
}

pub fn validate_config(config: &HookConfig) -> Result<()> {
    if config.comment_char != COMMENT_CHAR_AUTO && config.comment_char.chars().count() != 1 {
        return Err(anyhow!(
            "comment_char must be a single character or \"auto\" (got {:?})",
            config.comment_char
        ));
    }
    for key in &config.priority_keys {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(anyhow!("priority key {key:?} is not a trailer key"));
        }
    }
    if config.title_warn_len > config.title_max_len {
        return Err(anyhow!(
            "title_warn_len ({}) must not exceed title_max_len ({})",
            config.title_warn_len,
            config.title_max_len
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
