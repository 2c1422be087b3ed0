//! Filesystem document source.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_core::document_id;
use walkdir::{DirEntry, WalkDir};

/// Reads every document under a vault root.
///
/// Excluded directory names are pruned wherever they appear. Files are
/// visited in sorted path order, so "first" is well defined when two files
/// share an id.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    config: IndexConfig,
}

impl FsDocumentSource {
    /// Create a source for `config.vault_path`, which must be an existing directory
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate_vault()?;
        Ok(Self { config })
    }

    pub fn root(&self) -> &Path {
        &self.config.vault_path
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .is_none_or(|name| !self.config.is_excluded(name))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn read_document(&self, entry: &DirEntry) -> std::result::Result<Option<Document>, Diagnostic> {
        let path = entry.path();
        let relative = self.relative(path);

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        if !self.config.is_document_name(name) {
            return Ok(None);
        }

        let metadata = entry
            .metadata()
            .map_err(|e| Diagnostic::unreadable(&relative, e))?;

        if metadata.len() > self.config.max_file_size {
            return Err(Diagnostic::new(
                DiagnosticKind::DocumentTooLarge,
                &relative,
                format!(
                    "{} bytes exceeds limit of {} bytes",
                    metadata.len(),
                    self.config.max_file_size
                ),
            ));
        }

        let bytes = std::fs::read(path).map_err(|e| Diagnostic::unreadable(&relative, e))?;
        let content = String::from_utf8(bytes).map_err(|e| Diagnostic::unreadable(&relative, e))?;

        let Some(id) = document_id(path) else {
            return Ok(None);
        };

        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(Some(Document::new(id, relative, content, modified)))
    }
}

impl DocumentSource for FsDocumentSource {
    #[instrument(skip(self), fields(root = %self.root().display()), name = "vault_scan")]
    fn scan(&self) -> Result<SourceScan> {
        let mut scan = SourceScan::default();

        let walker = WalkDir::new(self.root())
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.keep_entry(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| self.relative(p)).unwrap_or_default();
                    scan.diagnostics.push(Diagnostic::unreadable(path, e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match self.read_document(&entry) {
                Ok(Some(doc)) => scan.documents.push(doc),
                Ok(None) => {}
                Err(diag) => scan.diagnostics.push(diag),
            }
        }

        log::debug!(
            "Scanned {}: {} documents, {} diagnostics",
            self.root().display(),
            scan.documents.len(),
            scan.diagnostics.len()
        );

        Ok(scan)
    }
}
