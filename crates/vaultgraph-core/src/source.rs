//! Document source abstraction.
//!
//! The indexer never touches storage directly. A [`DocumentSource`] hands it a
//! complete snapshot of documents plus any per-document diagnostics collected
//! while reading them.

use crate::error::Result;
use crate::models::{Diagnostic, Document};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Result of one pass over a document source
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub documents: Vec<Document>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Supplies documents to the index builder.
///
/// Implementations must skip non-document artifacts and report undecodable
/// documents as diagnostics instead of failing the scan. An `Err` means the
/// source as a whole is unusable.
pub trait DocumentSource: Send + Sync {
    fn scan(&self) -> Result<SourceScan>;
}

/// In-memory document source
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSource {
    documents: Vec<Document>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document whose path is derived from its id
    pub fn with_document(
        mut self,
        id: impl Into<String>,
        content: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        let path = PathBuf::from(format!("{}.md", id));
        self.documents.push(Document::new(id, path, content, modified));
        self
    }

    /// Convenience for tests and embedders that do not track modification times
    pub fn with_text(self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.with_document(id, content, DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl DocumentSource for MemoryDocumentSource {
    fn scan(&self) -> Result<SourceScan> {
        Ok(SourceScan {
            documents: self.documents.clone(),
            diagnostics: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_scan() {
        let source = MemoryDocumentSource::new()
            .with_text("A", "[[B]]")
            .with_text("B", "");

        let scan = source.scan().unwrap();
        assert_eq!(scan.documents.len(), 2);
        assert_eq!(scan.documents[0].id, "A");
        assert_eq!(scan.documents[0].path, PathBuf::from("A.md"));
        assert!(scan.diagnostics.is_empty());
    }

    #[test]
    fn test_memory_source_is_reusable() {
        let source = MemoryDocumentSource::new().with_text("A", "text");
        let first = source.scan().unwrap();
        let second = source.scan().unwrap();
        assert_eq!(first.documents, second.documents);
    }
}
