//! Link extraction over a whole document.

use crate::code_blocks::CodeBlockLines;
use crate::link_utils::classify_reference;
use regex::Regex;
use vaultgraph_core::{Document, Link};

/// `(!)?[[body]]` where the body holds no brackets, so the first closing pair wins
const REFERENCE_PATTERN: &str = r"(!)?\[\[([^\[\]]+?)\]\]";

/// Extracts typed, positioned links from raw document text.
///
/// The pattern table is compiled once per extractor and never mutated, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"),
        }
    }

    /// Extract every link in `document`, in document order
    pub fn extract(&self, document: &Document) -> Vec<Link> {
        self.extract_text(&document.id, &document.content)
    }

    /// Extract links from raw text attributed to `source`.
    ///
    /// Lines inside fenced code blocks are ignored. Malformed references are
    /// skipped silently.
    pub fn extract_text(&self, source: &str, text: &str) -> Vec<Link> {
        let code_blocks = CodeBlockLines::scan(text);
        let mut links = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if !line.contains("[[") || code_blocks.contains(idx) {
                continue;
            }

            for caps in self.pattern.captures_iter(line) {
                let embed = caps.get(1).is_some();
                let Some(body) = caps.get(2) else { continue };

                let Some(parsed) = classify_reference(body.as_str(), embed) else {
                    log::trace!("Skipping malformed reference in {}:{}", source, idx + 1);
                    continue;
                };

                links.push(Link {
                    kind: parsed.kind,
                    source: source.to_string(),
                    raw_target: parsed.target,
                    resolved_target: None,
                    alias: parsed.alias,
                    section_name: parsed.section_name,
                    block_id: parsed.block_id,
                    line: idx + 1,
                });
            }
        }

        links
    }
}
