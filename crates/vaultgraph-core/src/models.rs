//! Core data models for documents, links and build diagnostics.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Immutable once built**: Documents and links are never mutated after indexing
//! - **Type-Safe**: Enums replace magic strings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single document read from a document source.
///
/// `id` is the normalized, case-sensitive name that references resolve against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    /// Source-relative path, for display and diagnostics
    pub path: PathBuf,
    pub content: String,
    pub modified: DateTime<Utc>,
}

impl Document {
    /// Create a new document
    pub fn new(
        id: impl Into<String>,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            content: content.into(),
            modified,
        }
    }
}

/// Kind of reference found in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// `[[Note]]`
    Direct,
    /// `![[Note]]`
    Embed,
    /// `[[Note#Heading]]`
    Section,
    /// `[[Note#^block]]`
    Block,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Direct => "direct",
            LinkKind::Embed => "embed",
            LinkKind::Section => "section",
            LinkKind::Block => "block",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, positioned reference from one document to a target name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Link {
    pub kind: LinkKind,
    /// Id of the document containing the link
    pub source: String,
    /// Target name as written, with qualifiers and alias removed
    pub raw_target: String,
    /// Id of the matched document, `None` when the link is broken
    pub resolved_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    /// 1-based line in the source document
    pub line: usize,
}

impl Link {
    /// Create an unresolved link of the given kind
    pub fn new(
        kind: LinkKind,
        source: impl Into<String>,
        raw_target: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            raw_target: raw_target.into(),
            resolved_target: None,
            alias: None,
            section_name: None,
            block_id: None,
            line,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_target.is_some()
    }
}

/// Category of a non-fatal build diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Document could not be read or decoded; it was skipped
    DocumentUnreadable,
    /// Document exceeded the configured size limit; it was skipped
    DocumentTooLarge,
    /// Another document already claimed the same id; this one was skipped
    DuplicateIdentity,
}

/// A recoverable problem recorded while scanning a document source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a diagnostic for a file that failed to read or decode
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::new(DiagnosticKind::DocumentUnreadable, path, reason.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}: {}", self.kind, self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_kind_serializes_lowercase() {
        let json = serde_json::to_string(&LinkKind::Embed).unwrap();
        assert_eq!(json, "\"embed\"");
        assert_eq!(LinkKind::Block.to_string(), "block");
    }

    #[test]
    fn test_new_link_is_unresolved() {
        let link = Link::new(LinkKind::Direct, "A", "B", 3);
        assert!(!link.is_resolved());
        assert_eq!(link.line, 3);
        assert_eq!(link.alias, None);
    }

    #[test]
    fn test_link_omits_absent_qualifiers() {
        let link = Link::new(LinkKind::Direct, "A", "B", 1);
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("alias").is_none());
        assert!(value.get("section_name").is_none());
        assert!(value.get("block_id").is_none());
        assert_eq!(value["resolved_target"], serde_json::Value::Null);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::unreadable("bad.md", "stream did not contain valid UTF-8");
        assert_eq!(diag.kind, DiagnosticKind::DocumentUnreadable);
        assert!(diag.to_string().contains("bad.md"));
    }
}
