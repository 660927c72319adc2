//! Workspace discovery, initialization, and configuration.
//!
//! A trak workspace is any directory containing a `.trak/` directory with a
//! `config.yaml` and the JSONL data files. Commands locate the workspace by
//! walking up from the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Error, Result};
use crate::store::jsonl::{SPRINTS_FILE, TICKETS_FILE, USERS_FILE};

/// Default ticket prefix if none specified
pub const DEFAULT_PREFIX: &str = "trak";

/// Name of the workspace data directory
pub const TRAK_DIR_NAME: &str = ".trak";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Version recorded in freshly initialized workspaces
pub const INITIAL_VERSION: &str = "0.1.0";

/// Minimum prefix length
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for a trak workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrakConfig {
    /// Ticket ID prefix (e.g. "trak" for "trak-a3f8")
    #[serde(rename = "ticket-prefix")]
    pub ticket_prefix: String,

    /// Workspace version, bumped by `trak version --bump`
    pub version: String,

    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("jsonl" for in-memory with JSONL persistence)
    pub backend: String,

    /// Path to the data directory, relative to the workspace root
    pub data_dir: String,
}

impl TrakConfig {
    /// Create a new configuration with the given prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            ticket_prefix: prefix.to_string(),
            version: INITIAL_VERSION.to_string(),
            storage: StorageConfig {
                backend: "jsonl".to_string(),
                data_dir: TRAK_DIR_NAME.to_string(),
            },
        }
    }

    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for TrakConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created data directory
    pub trak_dir: PathBuf,

    /// Path to the created config file
    pub config_file: PathBuf,

    /// The prefix used for ticket IDs
    pub prefix: String,
}

/// Validate a ticket ID prefix.
///
/// Requirements: 2-20 characters, alphanumeric only. Expects pre-trimmed
/// input.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix must be at least {} characters",
            MIN_PREFIX_LENGTH
        )));
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix cannot exceed {} characters",
            MAX_PREFIX_LENGTH
        )));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Config(
            "Prefix must contain only alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Initialize a new trak workspace in the given directory.
///
/// Creates `.trak/` with a config file and empty data files.
///
/// # Errors
///
/// Returns `Error::Config` if `.trak/` already exists or the prefix is
/// invalid.
pub async fn init(base_dir: &Path, prefix: Option<&str>) -> Result<InitResult> {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX).trim();
    validate_prefix(prefix)?;

    let trak_dir = base_dir.join(TRAK_DIR_NAME);
    if trak_dir.exists() {
        return Err(Error::Config(format!(
            "Trak is already initialized in this directory. Found existing '{}'",
            TRAK_DIR_NAME
        )));
    }

    fs::create_dir_all(&trak_dir).await?;

    let config_file = trak_dir.join(CONFIG_FILE_NAME);
    let config = TrakConfig::new(prefix);
    config.save(&config_file).await?;

    for data_file in [TICKETS_FILE, SPRINTS_FILE, USERS_FILE] {
        fs::write(trak_dir.join(data_file), "").await?;
    }

    Ok(InitResult {
        trak_dir,
        config_file,
        prefix: prefix.to_string(),
    })
}

/// Check if a directory has been initialized as a trak workspace.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TRAK_DIR_NAME).exists()
}

/// Find the workspace root by searching up the directory tree.
///
/// Returns the directory containing `.trak/`, or `None` if no workspace is
/// found within the depth limit.
pub fn find_trak_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TRAK_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::valid_short("ab")]
    #[case::valid_medium("trak")]
    #[case::valid_alphanumeric("team123")]
    #[case::valid_uppercase("TRAK")]
    #[case::valid_max_length("a1b2c3d4e5f6g7h8i9j0")]
    fn validate_prefix_accepts(#[case] prefix: &str) {
        assert!(validate_prefix(prefix).is_ok());
    }

    #[rstest]
    #[case::too_short("a", "at least 2")]
    #[case::empty("", "at least 2")]
    #[case::too_long("a".repeat(21), "cannot exceed 20")]
    #[case::hyphen("my-team", "alphanumeric")]
    #[case::space("my team", "alphanumeric")]
    fn validate_prefix_rejects(#[case] prefix: impl AsRef<str>, #[case] expected_error: &str) {
        let result = validate_prefix(prefix.as_ref());
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string().to_lowercase();
        assert!(
            err_msg.contains(&expected_error.to_lowercase()),
            "Expected error to contain '{}', got: '{}'",
            expected_error,
            err_msg
        );
    }

    #[tokio::test]
    async fn config_save_and_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let original = TrakConfig::new("team123");
        original.save(&config_path).await.unwrap();

        let loaded = TrakConfig::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn config_yaml_uses_kebab_case_prefix_key() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        TrakConfig::new("myteam").save(&config_path).await.unwrap();

        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(content.contains("ticket-prefix: myteam"));
        assert!(content.contains("version: 0.1.0"));
        assert!(content.contains("backend: jsonl"));
    }

    #[tokio::test]
    async fn init_creates_config_and_empty_data_files() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(temp_dir.path(), Some("myteam")).await.unwrap();
        assert_eq!(result.prefix, "myteam");
        assert!(result.trak_dir.exists());
        assert!(result.config_file.exists());

        for data_file in [TICKETS_FILE, SPRINTS_FILE, USERS_FILE] {
            let content = std::fs::read_to_string(result.trak_dir.join(data_file)).unwrap();
            assert!(content.is_empty());
        }
    }

    #[tokio::test]
    async fn init_fails_if_already_initialized() {
        let temp_dir = TempDir::new().unwrap();
        init(temp_dir.path(), None).await.unwrap();

        let result = init(temp_dir.path(), None).await;
        let err_msg = result.unwrap_err().to_string().to_lowercase();
        assert!(err_msg.contains("already initialized"));
    }

    #[tokio::test]
    async fn init_rejects_invalid_prefix() {
        let temp_dir = TempDir::new().unwrap();
        assert!(init(temp_dir.path(), Some("a")).await.is_err());
        assert!(!is_initialized(temp_dir.path()));
    }

    #[test]
    fn find_trak_root_walks_up_from_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join(TRAK_DIR_NAME)).unwrap();

        let sub_dir = temp_dir.path().join("sub").join("nested");
        std::fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(
            find_trak_root(&sub_dir),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn find_trak_root_returns_none_outside_a_workspace() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_trak_root(temp_dir.path()).is_none());
    }
}
