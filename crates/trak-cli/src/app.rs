//! Application context for CLI command execution.

use std::path::{Path, PathBuf};

use trak::error::{Error, Result};
use trak::store::{create_store, RecordStore, StoreBackend};
use trak::workspace::{find_trak_root, TrakConfig, CONFIG_FILE_NAME, TRAK_DIR_NAME};

/// Application context for CLI operations.
///
/// Finds the workspace, loads configuration, and opens the store. Listing
/// commands read through `store()`; `version --bump` rewrites the config.
pub struct App {
    store: Box<dyn RecordStore>,
    trak_dir: PathBuf,
    config: TrakConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("trak_dir", &self.trak_dir)
            .field("config", &self.config)
            .field("store", &"<dyn RecordStore>")
            .finish()
    }
}

impl App {
    /// Create an App from the given working directory, searching up the
    /// directory tree for the workspace root.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no workspace is found, and propagates
    /// config and store loading failures.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_trak_root(working_dir).ok_or_else(|| {
            Error::Config(
                "Not a trak workspace (or any parent directory). Run 'trak init' first."
                    .to_string(),
            )
        })?;

        let trak_dir = root_dir.join(TRAK_DIR_NAME);
        let config = TrakConfig::load(&trak_dir.join(CONFIG_FILE_NAME)).await?;

        let store = create_store(
            StoreBackend::Jsonl(trak_dir.clone()),
            config.ticket_prefix.clone(),
        )
        .await?;

        Ok(Self {
            store,
            trak_dir,
            config,
        })
    }

    /// Shared access to the store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// The loaded workspace configuration.
    pub fn config(&self) -> &TrakConfig {
        &self.config
    }

    /// Path to the workspace data directory (`.trak`).
    pub fn trak_dir(&self) -> &Path {
        &self.trak_dir
    }

    /// Overwrite the workspace configuration file.
    pub async fn save_config(&self, config: &TrakConfig) -> Result<()> {
        config.save(&self.trak_dir.join(CONFIG_FILE_NAME)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trak::workspace;

    #[tokio::test]
    async fn app_opens_an_initialized_workspace() {
        let temp_dir = TempDir::new().unwrap();
        workspace::init(temp_dir.path(), Some("myteam")).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();
        assert_eq!(app.config().ticket_prefix, "myteam");
        assert!(app.trak_dir().ends_with(".trak"));
    }

    #[tokio::test]
    async fn app_finds_the_workspace_from_a_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        workspace::init(temp_dir.path(), Some("myteam")).await.unwrap();

        let sub_dir = temp_dir.path().join("src").join("lib");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();
        assert_eq!(app.config().ticket_prefix, "myteam");
    }

    #[tokio::test]
    async fn app_fails_outside_a_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let err = App::from_directory(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a trak workspace"));
    }
}
