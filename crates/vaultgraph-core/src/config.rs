//! Configuration types for the indexer.
//!
//! Follows a builder pattern with validation. [`IndexConfig::load`] layers
//! built-in defaults, an optional config file and `VAULTGRAPH_*` environment
//! variables, in that order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable prefix for layered configuration
pub const ENV_PREFIX: &str = "VAULTGRAPH";

/// Deepest neighborhood a connections query may request
pub const MAX_DEPTH: usize = 3;

/// Indexer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    /// Root directory of the vault (used by filesystem sources)
    pub vault_path: PathBuf,
    /// Directory names pruned from the walk wherever they appear
    pub excluded_paths: HashSet<String>,
    /// File extensions treated as documents, with leading dot
    pub allowed_extensions: HashSet<String>,
    /// Documents larger than this many bytes are skipped with a diagnostic
    pub max_file_size: u64,
    /// Extract links on the rayon pool instead of the calling thread
    pub parallel_extraction: bool,
    /// Hub threshold used when a request omits one
    pub default_hub_threshold: usize,
    /// Connection depth used when a request omits one
    pub default_depth: usize,
    pub log_level: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::new(),
            excluded_paths: [".obsidian", ".git", ".trash", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_extensions: [".md", ".markdown"].iter().map(|s| s.to_string()).collect(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            parallel_extraction: true,
            default_hub_threshold: 5,
            default_depth: 1,
            log_level: "INFO".to_string(),
        }
    }
}

impl IndexConfig {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config builder rooted at `vault_path`
    pub fn builder(vault_path: impl Into<PathBuf>) -> IndexConfigBuilder {
        IndexConfigBuilder::new(vault_path)
    }

    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// A leading `~` in `vault_path` is expanded after merging.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            if !path.exists() {
                return Err(Error::config_error(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("excluded_paths")
                .with_list_parse_key("allowed_extensions"),
        );

        let mut loaded: IndexConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::config_error(format!("Failed to load configuration: {}", e)))?;

        loaded.vault_path = expand_path(&loaded.vault_path)?;
        loaded.validate()?;

        log::debug!(
            "Loaded configuration (file: {:?}, vault: {})",
            file,
            loaded.vault_path.display()
        );
        Ok(loaded)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(Error::config_error("max_file_size must be greater than zero"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one document extension must be allowed",
            ));
        }

        if let Some(ext) = self.allowed_extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(Error::config_error(format!(
                "Extension must start with '.': {}",
                ext
            )));
        }

        if !(1..=MAX_DEPTH).contains(&self.default_depth) {
            return Err(Error::config_error(format!(
                "default_depth must be between 1 and {}",
                MAX_DEPTH
            )));
        }

        Ok(())
    }

    /// Check that `vault_path` names an existing directory
    pub fn validate_vault(&self) -> Result<()> {
        if self.vault_path.as_os_str().is_empty() {
            return Err(Error::config_error("Vault path is not set"));
        }

        if !self.vault_path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.vault_path.display()
            )));
        }

        if !self.vault_path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.vault_path.display()
            )));
        }

        Ok(())
    }

    /// True if the file name carries an allowed document extension
    pub fn is_document_name(&self, name: &str) -> bool {
        self.allowed_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// True if a directory or file name is excluded from scanning
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_paths.contains(name)
    }
}

/// Expand `~` and environment references in a configured path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let Some(raw) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| Error::invalid_path(format!("Cannot expand {}: {}", raw, e)))
}

/// Builder for IndexConfig
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    /// Create a new builder
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            config: IndexConfig {
                vault_path: vault_path.into(),
                ..IndexConfig::default()
            },
        }
    }

    /// Add a directory name to prune
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(name.into());
        self
    }

    /// Replace the allowed extension set
    pub fn allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    pub fn parallel_extraction(mut self, enabled: bool) -> Self {
        self.config.parallel_extraction = enabled;
        self
    }

    pub fn default_hub_threshold(mut self, threshold: usize) -> Self {
        self.config.default_hub_threshold = threshold;
        self
    }

    pub fn default_depth(mut self, depth: usize) -> Self {
        self.config.default_depth = depth;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<IndexConfig> {
        let mut config = self.config;
        config.vault_path = expand_path(&config.vault_path)?;
        config.validate()?;
        Ok(config)
    }
}
