//! # Vaultgraph Tools
//!
//! Query façade over the [`Analyzer`](vaultgraph_graph::Analyzer).
//!
//! - [`GraphTools`] exposes one method per query and reshapes results into
//!   the response types in [`responses`]
//! - [`ToolRequest`] lets a dispatcher route requests by tool name through
//!   [`GraphTools::dispatch`]
//! - [`ResponseFormatter`] renders any response as JSON, human or text
//!
//! Responses distinguish "not built yet" (an error) from "no results"
//! (an empty list).
//!
//! ```
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use vaultgraph_core::prelude::*;
//! use vaultgraph_graph::Analyzer;
//! use vaultgraph_tools::{GraphTools, ToolRequest};
//!
//! let analyzer = Arc::new(Analyzer::new(IndexConfig::default()));
//! let source = MemoryDocumentSource::new().with_text("A", "[[B]]").with_text("B", "");
//! analyzer.build(&source, &CancellationToken::new()).unwrap();
//!
//! let tools = GraphTools::new(analyzer);
//! let value = tools
//!     .dispatch(&ToolRequest::GetBacklinks { target: "B".into() })
//!     .unwrap();
//! assert_eq!(value["count"], 1);
//! assert_eq!(value["results"][0]["source"], "A");
//! ```

pub mod graph_tools;
pub mod output_formatter;
pub mod requests;
pub mod responses;

pub use graph_tools::GraphTools;
pub use output_formatter::{OutputFormat, ResponseFormatter};
pub use requests::ToolRequest;
pub use responses::*;
