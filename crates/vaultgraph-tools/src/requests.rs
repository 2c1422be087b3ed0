//! Request shapes routed by tool name.

use serde::{Deserialize, Serialize};

/// A single query, tagged by tool name.
///
/// ```
/// use vaultgraph_tools::ToolRequest;
///
/// let json = r#"{"tool": "get_backlinks", "target": "B"}"#;
/// let req: ToolRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(req, ToolRequest::GetBacklinks { target: "B".into() });
/// assert_eq!(req.name(), "get_backlinks");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolRequest {
    GetBacklinks {
        target: String,
    },
    GetOutgoingLinks {
        document: String,
    },
    GetBrokenLinks,
    FindOrphans,
    FindHubs {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<usize>,
    },
    GetConnections {
        document: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        depth: Option<i64>,
    },
    LinkHealth,
}

impl ToolRequest {
    /// Tool name as it appears in the `tool` tag
    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::GetBacklinks { .. } => "get_backlinks",
            ToolRequest::GetOutgoingLinks { .. } => "get_outgoing_links",
            ToolRequest::GetBrokenLinks => "get_broken_links",
            ToolRequest::FindOrphans => "find_orphans",
            ToolRequest::FindHubs { .. } => "find_hubs",
            ToolRequest::GetConnections { .. } => "get_connections",
            ToolRequest::LinkHealth => "link_health",
        }
    }
}
