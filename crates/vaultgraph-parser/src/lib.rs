//! # Vaultgraph Parser
//!
//! Wikilink extraction for interlinked Markdown documents.
//!
//! Recognized forms:
//! - `[[Note]]` direct link
//! - `![[Note]]` embed
//! - `[[Note#Heading]]` section reference
//! - `[[Note#^block]]` block reference
//! - any of the above with `|alias`
//!
//! Fenced code blocks, as recognized by a CommonMark pass, are skipped.
//! Unterminated or empty references are
//! ignored rather than reported, so free-form text never fails extraction.
//!
//! ```
//! use vaultgraph_parser::LinkExtractor;
//! use vaultgraph_core::LinkKind;
//!
//! let extractor = LinkExtractor::new();
//! let links = extractor.extract_text("Alpha", "See [[Beta|the beta note]]\n![[Chart]]");
//!
//! assert_eq!(links.len(), 2);
//! assert_eq!(links[0].raw_target, "Beta");
//! assert_eq!(links[0].alias.as_deref(), Some("the beta note"));
//! assert_eq!(links[1].kind, LinkKind::Embed);
//! assert_eq!(links[1].line, 2);
//! ```

pub mod code_blocks;
pub mod extractor;
pub mod link_utils;

pub use extractor::LinkExtractor;
pub use code_blocks::CodeBlockLines;
pub use link_utils::{ParsedReference, classify_reference};
