//! Commit message model and the line-level stages that rewrite it.
//!
//! Every stage is a pure function over `Message` lines so the hook pipeline
//! can run them in sequence and persist only when the text actually changed.
mod footer;
mod inject;
mod line;
mod normalize;
mod tags;
mod title;

pub use inject::{has_change_id, inject_change_id, Injection, PriorityKeys};
pub use normalize::{normalize_lines, stripspace};
pub use tags::fixup_tags;
pub use title::{check_title, TitleLimits, TitleVerdict};

/// A commit message as an ordered list of lines without terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    lines: Vec<String>,
}

impl Message {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when nothing but blank lines survived normalization.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// First non-blank line; git strips leading blank lines before using it.
    pub fn title(&self) -> Option<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .find(|line| !line.is_empty())
    }

    /// Join lines with a single terminal newline.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> Message {
        Message::from_lines(text.lines().map(str::to_string).collect())
    }

    #[test]
    fn render_appends_single_newline() {
        assert_eq!(message("Title\n\nBody").render(), "Title\n\nBody\n");
        assert_eq!(Message::default().render(), "");
    }

    #[test]
    fn title_skips_leading_blank_lines() {
        let msg = Message::from_lines(vec![String::new(), "Subject".to_string()]);
        assert_eq!(msg.title(), Some("Subject"));
        assert!(!msg.is_blank());
        assert!(Message::from_lines(vec![String::new()]).is_blank());
    }
}
