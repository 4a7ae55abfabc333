//! Parsing of a note's leading metadata block.
//!
//! A note may open with a block delimited by two `---` marker lines. The
//! block holds `key: value` lines; everything after the closing marker is
//! the body. A block that is opened but never closed swallows the rest of
//! the text as metadata and leaves the body empty.

use crate::constants::{METADATA_MARKER, TAGS_PREFIX};

/// Line terminator a note was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF when the text contains any `\r\n`, LF otherwise
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A note split into its metadata lines and body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    /// Metadata lines, verbatim and in order, without terminators. Empty when
    /// there is no block.
    pub metadata: Vec<String>,
    /// Body text sliced from the source, trimmed of surrounding whitespace
    pub body: String,
    /// Whether the source text opened a metadata block
    pub has_block: bool,
    /// Terminator used when rendering the markers and metadata lines
    pub line_ending: LineEnding,
}

impl Note {
    /// Parse note text. Never fails: text without a block is all body.
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        let line_ending = LineEnding::detect(trimmed);
        let mut lines = trimmed.split_inclusive('\n');

        let mut offset = match lines.next() {
            Some(first) if is_marker(first) => first.len(),
            _ => {
                return Self {
                    metadata: Vec::new(),
                    body: trimmed.to_string(),
                    has_block: false,
                    line_ending,
                }
            }
        };

        let mut block = Vec::new();
        let mut body = "";
        for line in lines {
            offset += line.len();
            if is_marker(line) {
                body = trimmed[offset..].trim();
                break;
            }
            block.push(strip_terminator(line));
        }

        Self {
            metadata: trim_blank_edges(&block),
            body: body.to_string(),
            has_block: true,
            line_ending,
        }
    }

    /// True when any metadata line is a `tags:` line, even an empty one
    pub fn has_tags(&self) -> bool {
        self.metadata.iter().any(|line| line.starts_with(TAGS_PREFIX))
    }

    /// Render with both markers, even around an empty block
    pub fn render(&self) -> String {
        let eol = self.line_ending.as_str();
        format!(
            "{marker}{eol}{}{eol}{marker}{eol}{}",
            self.metadata.join(eol),
            self.body,
            marker = METADATA_MARKER,
            eol = eol
        )
        .trim()
        .to_string()
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == METADATA_MARKER
}

// Leading and trailing blank lines inside the block carry no metadata
fn trim_blank_edges(lines: &[&str]) -> Vec<String> {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].iter().map(|l| l.to_string()).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_block() {
        let note = Note::parse("  just some text\n\nmore  \n");
        assert!(!note.has_block);
        assert!(note.metadata.is_empty());
        assert_eq!(note.body, "just some text\n\nmore");
    }

    #[test]
    fn test_parse_with_block() {
        let note = Note::parse("---\ntitle: Groceries\nauthor: me\n---\n\n# List\n- milk\n");
        assert!(note.has_block);
        assert_eq!(note.metadata, vec!["title: Groceries", "author: me"]);
        assert_eq!(note.body, "# List\n- milk");
        assert_eq!(note.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_parse_unclosed_block() {
        let note = Note::parse("---\ntitle: Draft\nstill metadata");
        assert!(note.has_block);
        assert_eq!(note.metadata, vec!["title: Draft", "still metadata"]);
        assert_eq!(note.body, "");
    }

    #[test]
    fn test_marker_later_in_body_is_not_a_block() {
        let note = Note::parse("intro\n---\ntags: nope\n---\n");
        assert!(!note.has_block);
        assert!(!note.has_tags());
    }

    #[test]
    fn test_body_keeps_horizontal_rules() {
        let note = Note::parse("---\na: 1\n---\nfirst\n---\nsecond");
        assert_eq!(note.body, "first\n---\nsecond");
    }

    #[test]
    fn test_has_tags() {
        assert!(Note::parse("---\ntags: a, b\n---\nbody").has_tags());
        assert!(Note::parse("---\ntags:\n---\nbody").has_tags());
        assert!(!Note::parse("---\ntitle: x\n---\nbody").has_tags());
        assert!(!Note::parse("---\n  tags: indented\n---\nbody").has_tags());
    }

    #[test]
    fn test_crlf_note_keeps_its_line_endings() {
        let source = "---\r\ntitle: Win\r\n---\r\nline one\r\nline two\r\n";
        let note = Note::parse(source);
        assert_eq!(note.line_ending, LineEnding::CrLf);
        assert_eq!(note.metadata, vec!["title: Win"]);
        assert_eq!(note.body, "line one\r\nline two");
        assert_eq!(note.render(), source.trim());
    }

    #[test]
    fn test_render_empty_block() {
        let note = Note::parse("body only");
        assert_eq!(note.render(), "---\n\n---\nbody only");
    }
}
