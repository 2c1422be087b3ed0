//! End-to-end tests: vault on disk → CLI arguments → rendered output

use clap::Parser;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use vaultgraph::cli::{self, Args};
use vaultgraph::OutputFormat;

fn create_vault() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    fs::write(root.join("A.md"), "# A\nLinks to [[B]]\nand to [[Z]]").unwrap();
    fs::write(root.join("B.md"), "# B\n![[C]]").unwrap();
    fs::write(root.join("C.md"), "# C\nLeaf note").unwrap();
    fs::create_dir(root.join(".obsidian")).unwrap();
    fs::write(root.join(".obsidian/app.md"), "[[A]] [[B]] [[C]]").unwrap();

    dir
}

fn args(vault: &TempDir, rest: &[&str]) -> Args {
    let mut argv = vec![
        "vaultgraph".to_string(),
        "--vault".to_string(),
        vault.path().display().to_string(),
    ];
    argv.extend(rest.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).expect("arguments should parse")
}

async fn run_json(vault: &TempDir, rest: &[&str]) -> Value {
    let args = args(vault, rest);
    let config = cli::load_config(&args).unwrap();
    let output = cli::run(&args, config).await.unwrap();
    serde_json::from_str(&output).expect("output should be JSON")
}

#[tokio::test]
async fn test_backlinks_end_to_end() {
    let vault = create_vault();
    let value = run_json(&vault, &["backlinks", "C"]).await;

    assert_eq!(value["target"], "C");
    assert_eq!(value["count"], 1);
    assert_eq!(value["results"][0]["source"], "B");
    assert_eq!(value["results"][0]["kind"], "embed");
    assert_eq!(value["results"][0]["line"], 2);
}

#[tokio::test]
async fn test_broken_links_end_to_end() {
    let vault = create_vault();
    let value = run_json(&vault, &["broken"]).await;

    assert_eq!(value["affected_document_count"], 1);
    assert_eq!(value["results"][0]["source"], "A");
    assert_eq!(value["results"][0]["broken_target"], "Z");
    assert_eq!(value["results"][0]["line"], 3);
}

#[tokio::test]
async fn test_orphans_and_hubs_end_to_end() {
    let vault = create_vault();

    let orphans = run_json(&vault, &["orphans"]).await;
    assert_eq!(orphans["count"], 0);

    let hubs = run_json(&vault, &["hubs", "--threshold", "1"]).await;
    assert_eq!(hubs["count"], 3);
    assert_eq!(hubs["documents"][0]["id"], "B");
    assert_eq!(hubs["documents"][0]["connection_count"], 2);
}

#[tokio::test]
async fn test_connections_end_to_end() {
    let vault = create_vault();
    let value = run_json(&vault, &["connections", "A", "--depth", "2"]).await;

    assert_eq!(value["document"], "A");
    assert_eq!(value["depth"], 2);
    assert_eq!(
        value["neighbors"],
        serde_json::json!([
            {"id": "B", "distance": 1},
            {"id": "C", "distance": 2}
        ])
    );
}

#[tokio::test]
async fn test_health_text_output() {
    let vault = create_vault();
    let args = args(&vault, &["--output-format", "text", "health"]);
    assert_eq!(args.output_format, OutputFormat::Text);

    let config = cli::load_config(&args).unwrap();
    let output = cli::run(&args, config).await.unwrap();

    assert!(output.contains("total_documents\t3"));
    assert!(output.contains("broken_links\t1"));
}

#[tokio::test]
async fn test_index_reports_build_summary() {
    let vault = create_vault();
    let value = run_json(&vault, &["index"]).await;

    assert_eq!(value["generation"], 1);
    assert_eq!(value["document_count"], 3);
    assert_eq!(value["link_count"], 3);
    assert_eq!(value["resolved_count"], 2);
    assert_eq!(value["broken_count"], 1);
    assert_eq!(value["diagnostics"], serde_json::json!([]));
}

#[tokio::test]
async fn test_config_file_sets_default_threshold() {
    let vault = create_vault();
    let config_dir = TempDir::new().unwrap();
    let config_file = config_dir.path().join("vaultgraph.toml");
    fs::write(&config_file, "default_hub_threshold = 2\n").unwrap();

    let config_arg = config_file.display().to_string();
    let value = run_json(&vault, &["--config", &config_arg, "hubs"]).await;

    assert_eq!(value["threshold"], 2);
    assert_eq!(value["count"], 1);
}

#[test]
fn test_missing_vault_is_a_config_error() {
    let args =
        Args::try_parse_from(["vaultgraph", "--vault", "/no/such/vault/dir", "broken"]).unwrap();
    assert!(cli::load_config(&args).is_err());
}

