//! # Link Graph Analysis
//!
//! Corpus index, reference resolution and graph queries for interlinked
//! documents.
//!
//! Build flow:
//! 1. A [`DocumentSource`](vaultgraph_core::DocumentSource) supplies documents
//! 2. Links are extracted per document, in parallel on the rayon pool
//! 3. Once every document is known, each link is resolved against the
//!    identity set; unmatched links go to the broken set
//! 4. The resulting [`CorpusIndex`] is published atomically
//!
//! Queries:
//! - **Backlinks** and **outgoing links** of a document
//! - **Broken links** grouped by source
//! - **Orphans**: no resolved links in or out
//! - **Hubs**: resolved degree at or above a threshold
//! - **Connections**: bounded BFS over links in both directions
//! - **Link health** statistics
//!
//! ## Quick Start
//!
//! ```
//! use vaultgraph_graph::Analyzer;
//! use vaultgraph_core::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! let source = MemoryDocumentSource::new()
//!     .with_text("A", "[[B]] and [[Z]]")
//!     .with_text("B", "![[C]]")
//!     .with_text("C", "");
//!
//! let analyzer = Analyzer::new(IndexConfig::default());
//! analyzer.build(&source, &CancellationToken::new()).unwrap();
//!
//! let backlinks = analyzer.get_backlinks("B").unwrap();
//! assert_eq!(backlinks[0].source, "A");
//! assert_eq!(analyzer.get_broken_links().unwrap()[0].links[0].broken_target, "Z");
//! ```

pub mod analyzer;
pub mod health;
pub mod index;
pub mod resolver;

pub use analyzer::{Analyzer, AnalyzerState, BuildReport};
pub use health::LinkHealth;
pub use index::{
    BrokenLink, Connection, CorpusIndex, DocumentBrokenLinks, HubEntry, IncomingRef, clamp_depth,
};
pub use resolver::IdentitySet;
