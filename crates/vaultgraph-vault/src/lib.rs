//! # Vaultgraph Vault
//!
//! Filesystem access and index lifecycle for a single vault.
//!
//! - [`FsDocumentSource`] walks the vault, prunes excluded directories and
//!   turns unreadable or oversized files into diagnostics
//! - [`VaultManager`] owns the [`Analyzer`](vaultgraph_graph::Analyzer) and
//!   runs cancellable rebuilds on the blocking pool
//!
//! ```no_run
//! use vaultgraph_core::IndexConfig;
//! use vaultgraph_vault::VaultManager;
//!
//! # async fn run() -> vaultgraph_core::Result<()> {
//! let config = IndexConfig::builder("~/Notes").build()?;
//! let manager = VaultManager::new(config)?;
//! let report = manager.rebuild().await?;
//! println!("{} documents, {} broken links", report.document_count, report.broken_count);
//!
//! let _hubs = manager.analyzer().find_hubs(5)?;
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod source;

pub use manager::VaultManager;
pub use source::FsDocumentSource;
