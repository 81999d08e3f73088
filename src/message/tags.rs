//! Issue-reference (`Bug:` / `Ping-Bug:`) cleanup.
//!
//! Candidate trailer lines are buffered until the next prose line proves they
//! were part of the body, in which case they are written back untouched. The
//! run still open at end of input is the trailer block and gets rewritten:
//! issue references first, one blank line above them, other trailers after a
//! blank line, and nothing blank at the end.
//!
//! A prose line that happens to match the issue-reference pattern and ends the
//! message is rewritten as a tag; there is no context to tell it apart.
use super::line::{canonical_issue_reference, is_issue_reference, looks_like_trailer_key};
use super::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagLine {
    IssueReference,
    Blank,
    Trailer,
    Prose,
}

impl TagLine {
    fn of(line: &str) -> Self {
        if is_issue_reference(line) {
            TagLine::IssueReference
        } else if line.is_empty() {
            TagLine::Blank
        } else if looks_like_trailer_key(line) {
            TagLine::Trailer
        } else {
            TagLine::Prose
        }
    }
}

#[derive(Debug, Default)]
struct TagScan {
    out: Vec<String>,
    /// Blank and trailer-shaped lines since the last prose line.
    run: Vec<(TagLine, String)>,
    seen_title: bool,
}

impl TagScan {
    fn push(&mut self, line: &str) {
        if !self.seen_title {
            self.seen_title = !line.is_empty();
            self.out.push(line.to_string());
            return;
        }

        let kind = TagLine::of(line);
        if kind == TagLine::Prose {
            self.out.extend(self.run.drain(..).map(|(_, line)| line));
            self.out.push(line.to_string());
        } else {
            self.run.push((kind, line.to_string()));
        }
    }

    fn finish(mut self) -> Vec<String> {
        let has_reference = self
            .run
            .iter()
            .any(|(kind, _)| *kind == TagLine::IssueReference);
        if !has_reference {
            self.out.extend(self.run.drain(..).map(|(_, line)| line));
            return self.out;
        }

        // The run always follows prose or the title.
        self.out.push(String::new());

        let mut others = Vec::new();
        for (kind, line) in self.run.drain(..) {
            match kind {
                TagLine::IssueReference => self.out.push(canonical_issue_reference(&line)),
                TagLine::Trailer => others.push(line),
                TagLine::Blank | TagLine::Prose => {}
            }
        }
        if !others.is_empty() {
            self.out.push(String::new());
            self.out.extend(others);
        }
        self.out
    }
}

/// Normalize and relocate the trailing issue-reference block of `message`.
pub fn fixup_tags(message: &Message) -> Message {
    let mut scan = TagScan::default();
    for line in message.lines() {
        scan.push(line);
    }
    Message::from_lines(scan.finish())
}
