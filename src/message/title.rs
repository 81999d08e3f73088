use super::Message;
use crate::error::HookError;

/// Soft and hard limits for the summary line, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleLimits {
    pub warn: usize,
    pub max: usize,
}

impl Default for TitleLimits {
    fn default() -> Self {
        Self { warn: 80, max: 100 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleVerdict {
    Ok,
    /// Over the soft limit; reverts and similar generated titles land here.
    TooLong { len: usize },
}

/// Check the summary line; above the hard limit the hook must not continue.
pub fn check_title(message: &Message, limits: TitleLimits) -> Result<TitleVerdict, HookError> {
    let len = message.title().map_or(0, |title| title.chars().count());
    if len > limits.max {
        return Err(HookError::TitleTooLong {
            len,
            max: limits.max,
        });
    }
    if len > limits.warn {
        tracing::warn!(
            len,
            limit = limits.warn,
            "commit title is longer than {} characters",
            limits.warn
        );
        return Ok(TitleVerdict::TooLong { len });
    }
    Ok(TitleVerdict::Ok)
}
