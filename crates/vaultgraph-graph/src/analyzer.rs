//! Graph analyzer: builds snapshots and answers queries against the current one.
//!
//! The analyzer holds at most one published [`CorpusIndex`]. A build runs
//! entirely off to the side and is published with a single atomic pointer
//! swap, so readers see either the previous snapshot or the new one, never a
//! partial index. A failed or cancelled build leaves the previous snapshot in
//! place.

use crate::health::LinkHealth;
use crate::index::{Connection, CorpusIndex, DocumentBrokenLinks, HubEntry, IncomingRef};
use arc_swap::ArcSwapOption;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_parser::LinkExtractor;

/// Lifecycle state visible to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalyzerState {
    Unbuilt,
    Built { generation: u64 },
}

/// Summary of a successful build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub generation: u64,
    pub document_count: usize,
    /// Every extracted link, resolved or not
    pub link_count: usize,
    pub resolved_count: usize,
    pub broken_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed_ms: u64,
}

/// Builds corpus snapshots and runs graph queries over the published one
pub struct Analyzer {
    config: IndexConfig,
    extractor: LinkExtractor,
    current: ArcSwapOption<CorpusIndex>,
    generation: AtomicU64,
    build_lock: Mutex<()>,
}

impl Analyzer {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            extractor: LinkExtractor::new(),
            current: ArcSwapOption::empty(),
            generation: AtomicU64::new(0),
            build_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn state(&self) -> AnalyzerState {
        match self.current.load_full() {
            Some(index) => AnalyzerState::Built {
                generation: index.generation(),
            },
            None => AnalyzerState::Unbuilt,
        }
    }

    /// The published snapshot, or `QueryBeforeBuild`
    pub fn snapshot(&self) -> Result<Arc<CorpusIndex>> {
        self.current.load_full().ok_or(Error::QueryBeforeBuild)
    }

    /// Scan `source`, extract and resolve every link, and publish a new snapshot.
    ///
    /// Cancellation is checked before each document's extraction and once more
    /// before publishing. Builds are serialized; concurrent callers wait.
    #[instrument(skip(self, source, cancel), name = "index_build")]
    pub fn build(
        &self,
        source: &dyn DocumentSource,
        cancel: &CancellationToken,
    ) -> Result<BuildReport> {
        let _guard = self
            .build_lock
            .lock()
            .map_err(|_| Error::other("Index build lock poisoned"))?;
        let start = Instant::now();

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let SourceScan {
            documents,
            mut diagnostics,
        } = source.scan()?;
        let documents = dedupe_identities(documents, &mut diagnostics);

        for diag in &diagnostics {
            log::warn!("Skipped document {}: {}", diag.path.display(), diag.message);
        }

        let extracted = self.extract_all(&documents, cancel)?;
        let link_count = extracted.iter().map(Vec::len).sum();

        if cancel.is_cancelled() {
            log::info!("Index build cancelled before publish");
            return Err(Error::Cancelled);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let index = CorpusIndex::build(&documents, extracted, diagnostics, generation);

        let report = BuildReport {
            generation,
            document_count: index.document_count(),
            link_count,
            resolved_count: index.resolved_link_count(),
            broken_count: index.broken_link_count(),
            diagnostics: index.diagnostics().to_vec(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        self.current.store(Some(Arc::new(index)));

        log::info!(
            "Index generation {} built: {} documents, {} links ({} broken), {} diagnostics in {}ms",
            report.generation,
            report.document_count,
            report.link_count,
            report.broken_count,
            report.diagnostics.len(),
            report.elapsed_ms
        );

        Ok(report)
    }

    fn extract_all(
        &self,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<Link>>> {
        let extract_one = |doc: &Document| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            Ok(self.extractor.extract(doc))
        };

        if self.config.parallel_extraction {
            documents.par_iter().map(extract_one).collect()
        } else {
            documents.iter().map(extract_one).collect()
        }
    }

    /// Resolved links pointing at `target`, ordered by source id then line
    pub fn get_backlinks(&self, target: &str) -> Result<Vec<IncomingRef>> {
        Ok(self.snapshot()?.backlinks(target).to_vec())
    }

    /// Resolved links leaving `source`, in document order
    pub fn get_outgoing_links(&self, source: &str) -> Result<Vec<Link>> {
        Ok(self.snapshot()?.outgoing_links(source).to_vec())
    }

    pub fn get_broken_links(&self) -> Result<Vec<DocumentBrokenLinks>> {
        Ok(self.snapshot()?.broken_links())
    }

    pub fn find_orphans(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.orphans())
    }

    pub fn find_hubs(&self, threshold: usize) -> Result<Vec<HubEntry>> {
        Ok(self.snapshot()?.hubs(threshold))
    }

    /// Neighborhood of `document`; `depth` is clamped, never rejected
    pub fn get_connections(&self, document: &str, depth: i64) -> Result<Vec<Connection>> {
        Ok(self.snapshot()?.connections(document, depth))
    }

    pub fn link_health(&self) -> Result<LinkHealth> {
        Ok(LinkHealth::from_index(&*self.snapshot()?))
    }
}

/// Keep the first document for each id; later ones become diagnostics
fn dedupe_identities(
    documents: Vec<Document>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Document> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(documents.len());

    for doc in documents {
        if seen.insert(doc.id.clone()) {
            unique.push(doc);
        } else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DuplicateIdentity,
                doc.path.clone(),
                format!("Document id '{}' already in use", doc.id),
            ));
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> MemoryDocumentSource {
        MemoryDocumentSource::new()
            .with_text("A", "[[B]]\n[[Z]]")
            .with_text("B", "![[C]]")
            .with_text("C", "")
    }

    fn built(source: &MemoryDocumentSource) -> Analyzer {
        let analyzer = Analyzer::new(IndexConfig::default());
        analyzer.build(source, &CancellationToken::new()).unwrap();
        analyzer
    }

    #[test]
    fn test_queries_fail_before_build() {
        let analyzer = Analyzer::new(IndexConfig::default());
        assert_eq!(analyzer.state(), AnalyzerState::Unbuilt);
        assert!(analyzer.get_backlinks("A").unwrap_err().is_unbuilt());
        assert!(analyzer.get_broken_links().unwrap_err().is_unbuilt());
        assert!(analyzer.find_orphans().unwrap_err().is_unbuilt());
        assert!(analyzer.find_hubs(1).unwrap_err().is_unbuilt());
        assert!(analyzer.get_connections("A", 1).unwrap_err().is_unbuilt());
        assert!(analyzer.get_outgoing_links("A").unwrap_err().is_unbuilt());
        assert!(analyzer.link_health().unwrap_err().is_unbuilt());
    }

    #[test]
    fn test_build_report() {
        let analyzer = Analyzer::new(IndexConfig::default());
        let report = analyzer.build(&corpus(), &CancellationToken::new()).unwrap();

        assert_eq!(report.generation, 1);
        assert_eq!(report.document_count, 3);
        assert_eq!(report.link_count, 3);
        assert_eq!(report.resolved_count, 2);
        assert_eq!(report.broken_count, 1);
        assert!(report.diagnostics.is_empty());
        assert_eq!(analyzer.state(), AnalyzerState::Built { generation: 1 });
    }

    #[test]
    fn test_empty_results_are_not_errors() {
        let analyzer = built(&corpus());
        assert!(analyzer.get_backlinks("A").unwrap().is_empty());
        assert!(analyzer.get_backlinks("Nobody").unwrap().is_empty());
        assert!(analyzer.find_orphans().unwrap().is_empty());
    }

    #[test]
    fn test_cancelled_build_keeps_previous_snapshot() {
        let analyzer = built(&corpus());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let bigger = corpus().with_text("D", "[[A]]");
        let result = analyzer.build(&bigger, &cancel);

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(analyzer.state(), AnalyzerState::Built { generation: 1 });
        assert_eq!(analyzer.snapshot().unwrap().document_count(), 3);
    }

    /// Cancels the build's token while the scan is in progress
    struct CancelDuringScan {
        inner: MemoryDocumentSource,
        cancel: CancellationToken,
    }

    impl DocumentSource for CancelDuringScan {
        fn scan(&self) -> Result<SourceScan> {
            self.cancel.cancel();
            self.inner.scan()
        }
    }

    #[test]
    fn test_cancel_after_scan_stops_extraction() {
        for parallel in [true, false] {
            let mut config = IndexConfig::default();
            config.parallel_extraction = parallel;
            let analyzer = Analyzer::new(config);
            analyzer.build(&corpus(), &CancellationToken::new()).unwrap();

            let cancel = CancellationToken::new();
            let source = CancelDuringScan {
                inner: corpus().with_text("D", "[[A]]"),
                cancel: cancel.clone(),
            };
            let result = analyzer.build(&source, &cancel);

            assert!(cancel.is_cancelled());
            assert!(matches!(result, Err(Error::Cancelled)));
            assert_eq!(analyzer.state(), AnalyzerState::Built { generation: 1 });
            assert_eq!(analyzer.snapshot().unwrap().document_count(), 3);

            let report = analyzer.build(&corpus(), &CancellationToken::new()).unwrap();
            assert_eq!(report.generation, 2);
        }
    }

    #[test]
    fn test_extraction_checks_cancellation_per_document() {
        let analyzer = Analyzer::new(IndexConfig::default());
        let documents = corpus().scan().unwrap().documents;

        let cancel = CancellationToken::new();
        assert_eq!(analyzer.extract_all(&documents, &cancel).unwrap().len(), 3);

        cancel.cancel();
        assert!(matches!(
            analyzer.extract_all(&documents, &cancel),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_cancelled_first_build_stays_unbuilt() {
        let analyzer = Analyzer::new(IndexConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(analyzer.build(&corpus(), &cancel).is_err());
        assert_eq!(analyzer.state(), AnalyzerState::Unbuilt);
    }

    #[test]
    fn test_rebuild_swaps_snapshot() {
        let analyzer = built(&corpus());
        let old = analyzer.snapshot().unwrap();

        analyzer
            .build(&corpus().with_text("Z", ""), &CancellationToken::new())
            .unwrap();

        // readers holding the old snapshot keep a consistent view
        assert_eq!(old.broken_link_count(), 1);
        assert_eq!(analyzer.snapshot().unwrap().broken_link_count(), 0);
        assert_eq!(analyzer.state(), AnalyzerState::Built { generation: 2 });
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let source = MemoryDocumentSource::new()
            .with_text("A", "[[B]]")
            .with_text("A", "[[C]]")
            .with_text("B", "");
        let analyzer = Analyzer::new(IndexConfig::default());
        let report = analyzer.build(&source, &CancellationToken::new()).unwrap();

        assert_eq!(report.document_count, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::DuplicateIdentity);
        assert_eq!(analyzer.get_outgoing_links("A").unwrap()[0].raw_target, "B");
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let mut config = IndexConfig::default();
        config.parallel_extraction = false;
        let sequential = Analyzer::new(config);
        sequential.build(&corpus(), &CancellationToken::new()).unwrap();
        let parallel = built(&corpus());

        assert_eq!(
            sequential.get_backlinks("B").unwrap(),
            parallel.get_backlinks("B").unwrap()
        );
        assert_eq!(sequential.find_hubs(0).unwrap(), parallel.find_hubs(0).unwrap());
    }
}
