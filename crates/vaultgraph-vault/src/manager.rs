//! Vault manager: owns the analyzer for one vault and drives rebuilds.

use crate::source::FsDocumentSource;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_graph::{Analyzer, AnalyzerState, BuildReport};

/// Main vault manager with async rebuild and cancellation
pub struct VaultManager {
    config: IndexConfig,
    source: Arc<FsDocumentSource>,
    analyzer: Arc<Analyzer>,
    /// Parent of every in-flight build token; replaced after each cancel
    cancel: Mutex<CancellationToken>,
}

impl VaultManager {
    /// Create a new vault manager. The index stays unbuilt until [`rebuild`](Self::rebuild).
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let source = FsDocumentSource::new(config.clone())?;

        Ok(Self {
            analyzer: Arc::new(Analyzer::new(config.clone())),
            source: Arc::new(source),
            config,
            cancel: Mutex::new(CancellationToken::new()),
        })
    }

    /// Get vault path
    pub fn vault_path(&self) -> &Path {
        &self.config.vault_path
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Shared handle to the analyzer, for query façades
    pub fn analyzer(&self) -> Arc<Analyzer> {
        Arc::clone(&self.analyzer)
    }

    pub fn state(&self) -> AnalyzerState {
        self.analyzer.state()
    }

    /// Rescan the vault and publish a fresh snapshot.
    ///
    /// The build runs on the blocking pool. Queries keep hitting the previous
    /// snapshot until the new one is swapped in.
    #[instrument(
        skip(self),
        fields(vault = %self.config.vault_path.display()),
        name = "vault_rebuild"
    )]
    pub async fn rebuild(&self) -> Result<BuildReport> {
        let token = self.cancel.lock().await.child_token();
        let source = Arc::clone(&self.source);
        let analyzer = Arc::clone(&self.analyzer);

        log::info!("Rebuilding index for: {:?}", self.config.vault_path);

        tokio::task::spawn_blocking(move || analyzer.build(source.as_ref(), &token))
            .await
            .map_err(|e| Error::other(format!("Index build task failed: {}", e)))?
    }

    /// Cancel every rebuild currently in flight. Later rebuilds are unaffected.
    pub async fn cancel_rebuild(&self) {
        let mut current = self.cancel.lock().await;
        current.cancel();
        *current = CancellationToken::new();
        log::info!("Cancelled in-flight rebuilds");
    }
}
