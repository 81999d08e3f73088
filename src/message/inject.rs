use super::footer::{classify_footer, FooterClassification};
use super::line::trailer_key;
use super::Message;

pub const CHANGE_ID_KEY: &str = "Change-Id";

/// Trailer keys that stay above the injected Change-Id, compared
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityKeys(Vec<String>);

impl PriorityKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|candidate| candidate.eq_ignore_ascii_case(key))
    }

    fn ranks_above_change_id(&self, line: &str) -> bool {
        trailer_key(line).is_some_and(|key| self.contains(key))
    }
}

impl Default for PriorityKeys {
    fn default() -> Self {
        Self::new(["Bug", "Issue", "Test"])
    }
}

/// Outcome of the Change-Id insertion stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    Inserted(Message),
    AlreadyPresent,
    EmptyMessage,
}

fn is_change_id(line: &str) -> bool {
    trailer_key(line).is_some_and(|key| key.eq_ignore_ascii_case(CHANGE_ID_KEY))
}

fn footer_has_change_id(classified: &FooterClassification) -> bool {
    classified
        .footer()
        .is_some_and(|footer| footer.lines.iter().any(|line| is_change_id(line)))
}

/// True when the confirmed footer already carries a `Change-Id:` key.
/// Body lines that happen to start with the key do not count.
pub fn has_change_id(lines: &[String]) -> bool {
    footer_has_change_id(&classify_footer(lines))
}

/// Insert `Change-Id: <change_id>` into the footer of `message`.
///
/// With a confirmed footer the trailer lands before the first non-priority
/// line; otherwise it opens a new footer one blank line below the body.
/// Trailing blank lines of the message are dropped either way.
pub fn inject_change_id(message: &Message, change_id: &str, priority: &PriorityKeys) -> Injection {
    if message.is_blank() {
        return Injection::EmptyMessage;
    }
    let classified = classify_footer(message.lines());
    if footer_has_change_id(&classified) {
        return Injection::AlreadyPresent;
    }

    let trailer = format!("{CHANGE_ID_KEY}: {change_id}");
    let body = classified.body();
    let mut out = Vec::with_capacity(message.lines().len() + 2);

    let Some(footer) = classified.footer() else {
        for (idx, segment) in body.iter().enumerate() {
            out.extend(segment.lines.iter().cloned());
            if idx + 1 < body.len() {
                out.resize(out.len() + segment.blanks_after, String::new());
            }
        }
        out.push(String::new());
        out.push(trailer);
        return Injection::Inserted(Message::from_lines(out));
    };

    for segment in body {
        out.extend(segment.lines.iter().cloned());
        out.resize(out.len() + segment.blanks_after, String::new());
    }
    let mut pending = Some(trailer);
    for line in &footer.lines {
        if !priority.ranks_above_change_id(line) {
            if let Some(trailer) = pending.take() {
                out.push(trailer);
            }
        }
        out.push(line.clone());
    }
    out.extend(pending);
    Injection::Inserted(Message::from_lines(out))
}
