//! # Vaultgraph Core
//!
//! Core data models, error types, configuration and the document source
//! abstraction. Every other Vaultgraph crate depends on these types.
//!
//! ## Core Modules
//!
//! - [`models`] - Documents, links and build diagnostics
//! - [`error`] - Error type and Result alias
//! - [`config`] - Indexer configuration with layered loading
//! - [`source`] - The [`DocumentSource`] trait and an in-memory source
//! - [`utils`] - Small shared helpers
//!
//! ## Usage
//!
//! ```
//! use vaultgraph_core::prelude::*;
//!
//! let source = MemoryDocumentSource::new()
//!     .with_text("Alpha", "See [[Beta]]")
//!     .with_text("Beta", "");
//!
//! let scan = source.scan().unwrap();
//! assert_eq!(scan.documents.len(), 2);
//!
//! let config = IndexConfig::default();
//! assert_eq!(config.default_hub_threshold, 5);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use source::{DocumentSource, MemoryDocumentSource, SourceScan};
pub use utils::document_id;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{IndexConfig, IndexConfigBuilder, MAX_DEPTH};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Diagnostic, DiagnosticKind, Document, Link, LinkKind};
    pub use crate::source::{DocumentSource, MemoryDocumentSource, SourceScan};
}
