//! Fenced code block detection.
//!
//! Block structure comes from a CommonMark pass with `pulldown-cmark`; the
//! byte ranges of fenced blocks are then mapped onto 0-based line numbers so
//! extraction can stay line oriented.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use std::ops::Range;

/// Lines of a document that belong to fenced code blocks, delimiters included.
///
/// An unclosed fence runs to the end of the document. Indented code blocks
/// and inline code spans are not excluded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodeBlockLines {
    /// Sorted, non-overlapping 0-based line ranges
    ranges: Vec<Range<usize>>,
}

impl CodeBlockLines {
    pub fn scan(text: &str) -> Self {
        if !text.contains("```") && !text.contains("~~~") {
            return Self::default();
        }

        let line_starts = line_starts(text);
        let mut ranges: Vec<Range<usize>> = Vec::new();

        for (event, range) in Parser::new(text).into_offset_iter() {
            let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) = event else {
                continue;
            };

            let first = line_of(&line_starts, range.start);
            let last = line_of(&line_starts, range.end.saturating_sub(1).max(range.start));

            // fences nested in containers can repeat a line already covered
            match ranges.last_mut() {
                Some(prev) if prev.end > first => prev.end = prev.end.max(last + 1),
                _ => ranges.push(first..last + 1),
            }
        }

        Self { ranges }
    }

    /// True if 0-based `line` sits inside a fenced code block
    pub fn contains(&self, line: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= line);
        self.ranges.get(idx).is_some_and(|r| r.contains(&line))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Byte offset of the start of every line
fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn line_of(line_starts: &[usize], offset: usize) -> usize {
    line_starts.partition_point(|&start| start <= offset).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<usize> {
        let blocks = CodeBlockLines::scan(text);
        (0..text.lines().count()).filter(|&l| blocks.contains(l)).collect()
    }

    #[test]
    fn test_plain_text_has_no_blocks() {
        assert!(CodeBlockLines::scan("text with [[Link]]\n``inline`` code").is_empty());
    }

    #[test]
    fn test_backtick_fence_covers_delimiters() {
        assert_eq!(lines("before\n```rust\nlet x = 1;\n```\nafter"), vec![1, 2, 3]);
    }

    #[test]
    fn test_closing_fence_must_be_long_enough() {
        // ``` cannot close a ```` fence; the indented ````` can
        assert_eq!(lines("````\n```\n~~~~\n  `````\nafter"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        assert_eq!(lines("a\n~~~\n[[Hidden]]\nmore"), vec![1, 2, 3]);
    }

    #[test]
    fn test_inline_triple_backticks_are_not_a_fence() {
        assert!(CodeBlockLines::scan("```x``` then [[Inline]]\n[[Later]]").is_empty());
    }

    #[test]
    fn test_info_string_line_does_not_close() {
        assert_eq!(lines("```\n```js\n[[Hidden]]\n```\n[[Visible]]"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_indented_code_is_scanned() {
        assert!(CodeBlockLines::scan("para\n\n    indented ```\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(lines("x\r\n```\r\ncode\r\n```\r\ny"), vec![1, 2, 3]);
    }
}
