//! Response shapes handed to the tool-invocation layer.
//!
//! Optional fields are omitted from JSON when absent.

use serde::{Deserialize, Serialize};
use vaultgraph_core::{Diagnostic, DiagnosticKind, Link, LinkKind};
use vaultgraph_graph::{BuildReport, LinkHealth};

/// One incoming link in a backlinks response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinkResult {
    pub source: String,
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub line: usize,
}

impl From<&Link> for BacklinkResult {
    fn from(link: &Link) -> Self {
        Self {
            source: link.source.clone(),
            kind: link.kind,
            alias: link.alias.clone(),
            section: link.section_name.clone(),
            block_id: link.block_id.clone(),
            line: link.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinksResponse {
    pub target: String,
    pub count: usize,
    pub results: Vec<BacklinkResult>,
}

/// One resolved outgoing link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingLinkResult {
    pub target: String,
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub line: usize,
}

impl From<&Link> for OutgoingLinkResult {
    fn from(link: &Link) -> Self {
        Self {
            target: link
                .resolved_target
                .clone()
                .unwrap_or_else(|| link.raw_target.clone()),
            kind: link.kind,
            alias: link.alias.clone(),
            section: link.section_name.clone(),
            block_id: link.block_id.clone(),
            line: link.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingLinksResponse {
    pub document: String,
    pub count: usize,
    pub results: Vec<OutgoingLinkResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLinkResult {
    pub source: String,
    pub broken_target: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLinksResponse {
    pub affected_document_count: usize,
    pub results: Vec<BrokenLinkResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphansResponse {
    pub count: usize,
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubResult {
    pub id: String,
    pub connection_count: usize,
}

/// Hubs in descending degree order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubsResponse {
    pub threshold: usize,
    pub count: usize,
    pub documents: Vec<HubResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborResult {
    pub id: String,
    pub distance: usize,
}

/// Bounded neighborhood; `depth` is the clamped depth actually used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    pub document: String,
    pub depth: usize,
    pub neighbors: Vec<NeighborResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub health: LinkHealth,
    pub resolution_rate: f64,
}

impl From<LinkHealth> for HealthResponse {
    fn from(health: LinkHealth) -> Self {
        Self {
            resolution_rate: health.resolution_rate(),
            health,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticInfo {
    pub kind: DiagnosticKind,
    pub path: String,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticInfo {
    fn from(diag: &Diagnostic) -> Self {
        Self {
            kind: diag.kind,
            path: diag.path.to_string_lossy().to_string(),
            message: diag.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResponse {
    pub generation: u64,
    pub document_count: usize,
    pub link_count: usize,
    pub resolved_count: usize,
    pub broken_count: usize,
    pub diagnostics: Vec<DiagnosticInfo>,
    pub elapsed_ms: u64,
}

impl From<&BuildReport> for BuildResponse {
    fn from(report: &BuildReport) -> Self {
        Self {
            generation: report.generation,
            document_count: report.document_count,
            link_count: report.link_count,
            resolved_count: report.resolved_count,
            broken_count: report.broken_count,
            diagnostics: report.diagnostics.iter().map(DiagnosticInfo::from).collect(),
            elapsed_ms: report.elapsed_ms,
        }
    }
}
