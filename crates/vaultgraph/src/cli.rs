//! Command-line interface: argument types and the query runner used by the binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_tools::{BuildResponse, GraphTools, OutputFormat, ResponseFormatter, ToolRequest};
use vaultgraph_vault::VaultManager;

/// Vaultgraph - link graph queries over a Markdown vault
#[derive(Parser, Debug)]
#[command(name = "vaultgraph", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the vault directory
    #[arg(short, long, env = "VAULTGRAPH_VAULT_PATH")]
    pub vault: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (json, human, text)
    #[arg(long, default_value = "json")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build the index and print the build report
    Index,
    /// Documents linking to TARGET
    Backlinks { target: String },
    /// Links whose target matches no document
    Broken,
    /// Documents with no resolved links in or out
    Orphans,
    /// Documents with at least THRESHOLD resolved links
    Hubs {
        #[arg(short, long)]
        threshold: Option<usize>,
    },
    /// Documents within DEPTH hops of DOCUMENT (clamped to 1..=3)
    Connections {
        document: String,
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i64>,
    },
    /// Resolved links leaving DOCUMENT
    Outgoing { document: String },
    /// Corpus-wide link statistics
    Health,
}

impl Command {
    /// The façade request this subcommand maps to; `None` for `index`
    pub fn to_request(&self) -> Option<ToolRequest> {
        let request = match self.clone() {
            Command::Index => return None,
            Command::Backlinks { target } => ToolRequest::GetBacklinks { target },
            Command::Broken => ToolRequest::GetBrokenLinks,
            Command::Orphans => ToolRequest::FindOrphans,
            Command::Hubs { threshold } => ToolRequest::FindHubs { threshold },
            Command::Connections { document, depth } => {
                ToolRequest::GetConnections { document, depth }
            }
            Command::Outgoing { document } => ToolRequest::GetOutgoingLinks { document },
            Command::Health => ToolRequest::LinkHealth,
        };
        Some(request)
    }
}

/// Merge file, environment and command-line settings into one config
pub fn load_config(args: &Args) -> Result<IndexConfig> {
    let mut config = IndexConfig::load(args.config.as_deref())?;
    if let Some(vault) = &args.vault {
        config.vault_path = vaultgraph_core::expand_path(vault)?;
    }
    config.validate_vault()?;
    Ok(config)
}

/// Build the index once, run the requested query and render it
#[instrument(skip(args, config), fields(command = ?args.command), name = "cli_run")]
pub async fn run(args: &Args, config: IndexConfig) -> Result<String> {
    let manager = VaultManager::new(config)?;
    let report = manager.rebuild().await?;

    log::info!(
        "Indexed {} documents ({} links, {} broken) in {}ms",
        report.document_count,
        report.link_count,
        report.broken_count,
        report.elapsed_ms
    );
    for diag in &report.diagnostics {
        log::warn!("{}", diag);
    }

    let response = match args.command.to_request() {
        Some(request) => GraphTools::new(manager.analyzer()).dispatch(&request)?,
        None => serde_json::to_value(BuildResponse::from(&report))
            .map_err(|e| Error::other(format!("Failed to serialize build report: {}", e)))?,
    };

    Ok(ResponseFormatter::format(&response, args.output_format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let args =
            Args::try_parse_from(["vaultgraph", "--vault", "/tmp/v", "hubs", "-t", "3"]).unwrap();
        assert_eq!(args.vault, Some(PathBuf::from("/tmp/v")));
        assert_eq!(args.command, Command::Hubs { threshold: Some(3) });
        assert_eq!(args.output_format, OutputFormat::Json);

        let args = Args::try_parse_from([
            "vaultgraph",
            "--output-format",
            "text",
            "connections",
            "Home",
            "--depth",
            "-2",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Text);
        assert_eq!(
            args.command.to_request(),
            Some(ToolRequest::GetConnections {
                document: "Home".into(),
                depth: Some(-2)
            })
        );
    }

    #[test]
    fn test_bad_output_format_is_rejected() {
        assert!(Args::try_parse_from(["vaultgraph", "--output-format", "xml", "broken"]).is_err());
    }

    #[test]
    fn test_every_command_maps_to_a_request() {
        let commands = [
            (Command::Broken, "get_broken_links"),
            (Command::Orphans, "find_orphans"),
            (Command::Health, "link_health"),
            (
                Command::Outgoing {
                    document: "A".into(),
                },
                "get_outgoing_links",
            ),
            (
                Command::Backlinks {
                    target: "A".into(),
                },
                "get_backlinks",
            ),
        ];
        for (command, name) in commands {
            assert_eq!(command.to_request().map(|r| r.name()), Some(name));
        }
        assert_eq!(Command::Index.to_request(), None);
    }
}
