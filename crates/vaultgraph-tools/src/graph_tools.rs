//! Graph query tools

use crate::requests::ToolRequest;
use crate::responses::*;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_graph::{Analyzer, clamp_depth};

/// Graph tools context.
///
/// Each method calls exactly one analyzer operation and reshapes the result.
/// No I/O happens here.
pub struct GraphTools {
    pub analyzer: Arc<Analyzer>,
}

impl GraphTools {
    /// Create new graph tools
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Documents linking to `target`
    pub fn get_backlinks(&self, target: &str) -> Result<BacklinksResponse> {
        let results: Vec<BacklinkResult> = self
            .analyzer
            .get_backlinks(target)?
            .iter()
            .map(|incoming| BacklinkResult::from(&incoming.link))
            .collect();

        Ok(BacklinksResponse {
            target: target.to_string(),
            count: results.len(),
            results,
        })
    }

    /// Resolved links leaving `document`
    pub fn get_outgoing_links(&self, document: &str) -> Result<OutgoingLinksResponse> {
        let results: Vec<OutgoingLinkResult> = self
            .analyzer
            .get_outgoing_links(document)?
            .iter()
            .map(OutgoingLinkResult::from)
            .collect();

        Ok(OutgoingLinksResponse {
            document: document.to_string(),
            count: results.len(),
            results,
        })
    }

    /// Unresolved links across the corpus
    pub fn get_broken_links(&self) -> Result<BrokenLinksResponse> {
        let groups = self.analyzer.get_broken_links()?;

        Ok(BrokenLinksResponse {
            affected_document_count: groups.len(),
            results: groups
                .into_iter()
                .flat_map(|group| group.links)
                .map(|broken| BrokenLinkResult {
                    source: broken.source,
                    broken_target: broken.broken_target,
                    line: broken.line,
                })
                .collect(),
        })
    }

    pub fn find_orphans(&self) -> Result<OrphansResponse> {
        let documents = self.analyzer.find_orphans()?;
        Ok(OrphansResponse {
            count: documents.len(),
            documents,
        })
    }

    /// Hubs at or above `threshold`, or the configured default
    pub fn find_hubs(&self, threshold: Option<usize>) -> Result<HubsResponse> {
        let threshold = threshold.unwrap_or(self.analyzer.config().default_hub_threshold);
        let documents: Vec<HubResult> = self
            .analyzer
            .find_hubs(threshold)?
            .into_iter()
            .map(|hub| HubResult {
                id: hub.id,
                connection_count: hub.degree,
            })
            .collect();

        Ok(HubsResponse {
            threshold,
            count: documents.len(),
            documents,
        })
    }

    /// Neighborhood of `document`, up to `depth` hops (clamped) or the configured default
    pub fn get_connections(
        &self,
        document: &str,
        depth: Option<i64>,
    ) -> Result<ConnectionsResponse> {
        let requested = depth.unwrap_or(self.analyzer.config().default_depth as i64);
        let neighbors = self
            .analyzer
            .get_connections(document, requested)?
            .into_iter()
            .map(|c| NeighborResult {
                id: c.id,
                distance: c.distance,
            })
            .collect();

        Ok(ConnectionsResponse {
            document: document.to_string(),
            depth: clamp_depth(requested),
            neighbors,
        })
    }

    pub fn link_health(&self) -> Result<HealthResponse> {
        Ok(HealthResponse::from(self.analyzer.link_health()?))
    }

    /// Route a request to its tool and serialize the response
    #[instrument(skip(self), fields(tool = request.name()), name = "tool_dispatch")]
    pub fn dispatch(&self, request: &ToolRequest) -> Result<Value> {
        log::debug!("Dispatching {}", request.name());

        match request {
            ToolRequest::GetBacklinks { target } => to_value(self.get_backlinks(target)?),
            ToolRequest::GetOutgoingLinks { document } => {
                to_value(self.get_outgoing_links(document)?)
            }
            ToolRequest::GetBrokenLinks => to_value(self.get_broken_links()?),
            ToolRequest::FindOrphans => to_value(self.find_orphans()?),
            ToolRequest::FindHubs { threshold } => to_value(self.find_hubs(*threshold)?),
            ToolRequest::GetConnections { document, depth } => {
                to_value(self.get_connections(document, *depth)?)
            }
            ToolRequest::LinkHealth => to_value(self.link_health()?),
        }
    }
}

fn to_value<T: Serialize>(response: T) -> Result<Value> {
    serde_json::to_value(response)
        .map_err(|e| Error::other(format!("Failed to serialize response: {}", e)))
}
