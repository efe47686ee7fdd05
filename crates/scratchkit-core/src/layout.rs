use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ScratchConfig;

pub const CONFIG_FILE_NAME: &str = "scratchkit.toml";

/// Resolves the project-relative paths named in a [`ScratchConfig`] against
/// the directory the tools were started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("failed to resolve current directory")?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            return relative.to_path_buf();
        }
        self.root.join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn scratch_definition_path(&self, config: &ScratchConfig) -> PathBuf {
        self.resolve(&config.scratch.definition_file)
    }

    pub fn pre_deploy_dir(&self, config: &ScratchConfig) -> PathBuf {
        self.resolve(&config.scratch.pre_deploy_dir)
    }

    pub fn currency_settings_paths(&self, config: &ScratchConfig) -> Vec<PathBuf> {
        config
            .currency
            .settings_files
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    pub fn currency_data_path(&self, config: &ScratchConfig) -> PathBuf {
        self.resolve(&config.currency.data_file)
    }
}
