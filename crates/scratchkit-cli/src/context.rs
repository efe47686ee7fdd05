use std::path::PathBuf;

use anyhow::{Context, Result};
use scratchkit_core::{OrgTool, ProjectLayout, ScratchConfig};

pub const CURRENCY_BIN_NAME: &str = "enable-multi-currency";

/// Project root plus the configuration loaded for it.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub layout: ProjectLayout,
    pub config: ScratchConfig,
}

impl ProjectContext {
    pub fn load(layout: ProjectLayout) -> Result<Self> {
        let config = ScratchConfig::load(&layout)?;
        Ok(Self { layout, config })
    }

    pub fn with_defaults(layout: ProjectLayout) -> Self {
        Self {
            layout,
            config: ScratchConfig::default(),
        }
    }

    pub fn tool(&self) -> OrgTool {
        OrgTool::from_config(&self.config)
    }
}

/// Path of a binary installed alongside the running one.
pub fn sibling_binary_path(name: &str) -> Result<PathBuf> {
    let current = std::env::current_exe().context("failed to resolve current executable")?;
    Ok(current.with_file_name(format!("{name}{}", std::env::consts::EXE_SUFFIX)))
}
