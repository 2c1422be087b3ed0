//! # Vaultgraph
//!
//! Link graph analysis for interlinked Markdown vaults: backlinks, broken
//! links, orphans, hubs and bounded-depth connections.
//!
//! This crate re-exports the workspace crates and hosts the `vaultgraph`
//! command-line tool.
//!
//! ```no_run
//! use vaultgraph::{GraphTools, IndexConfig, VaultManager};
//!
//! # async fn run() -> vaultgraph::Result<()> {
//! let manager = VaultManager::new(IndexConfig::builder("~/Notes").build()?)?;
//! manager.rebuild().await?;
//!
//! let tools = GraphTools::new(manager.analyzer());
//! let orphans = tools.find_orphans()?;
//! println!("{} orphaned notes", orphans.count);
//! # Ok(())
//! # }
//! ```

pub mod cli;

pub use vaultgraph_core::prelude::*;
pub use vaultgraph_graph::{
    Analyzer, AnalyzerState, BuildReport, Connection, CorpusIndex, HubEntry, IncomingRef,
    LinkHealth,
};
pub use vaultgraph_parser::LinkExtractor;
pub use vaultgraph_tools::*;
pub use vaultgraph_vault::{FsDocumentSource, VaultManager};
