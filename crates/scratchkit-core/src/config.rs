use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::ProjectLayout;

pub const DEFAULT_TOOL: &str = "sf";
pub const MAX_SCRATCH_DURATION_DAYS: u32 = 30;

const DEFAULT_PACKAGES: [(&str, &str); 6] = [
    ("Contacts & Organizations", "04t80000000gYcfAAE"),
    ("Household", "04t80000000jYrOAAU"),
    ("Affiliations", "04t80000001AVBMAA4"),
    ("Relationships", "04t80000000tpCGAAY"),
    ("Recurring Donations", "04t80000000tpCBAAY"),
    ("Nonprofit Success Pack", "04t1Y000001I8yUQAS"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScratchConfig {
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub scratch: ScratchSettings,
    #[serde(default = "default_packages")]
    pub packages: Vec<PackageSpec>,
    #[serde(default)]
    pub currency: CurrencySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScratchSettings {
    pub definition_file: PathBuf,
    pub pre_deploy_dir: PathBuf,
    pub duration_days: u32,
    pub install_wait_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencySettings {
    pub settings_files: Vec<PathBuf>,
    pub data_file: PathBuf,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            scratch: ScratchSettings::default(),
            packages: default_packages(),
            currency: CurrencySettings::default(),
        }
    }
}

impl Default for ScratchSettings {
    fn default() -> Self {
        Self {
            definition_file: PathBuf::from("config/project-scratch-def.json"),
            pre_deploy_dir: PathBuf::from("metadata/pre/npsp-dependencies"),
            duration_days: MAX_SCRATCH_DURATION_DAYS,
            install_wait_minutes: 15,
        }
    }
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            settings_files: vec![
                PathBuf::from("metadata/post/MultiCurrency/Currency.settings-meta.xml"),
                PathBuf::from("metadata/post/CurrencyEffectiveDates/Currency.settings-meta.xml"),
            ],
            data_file: PathBuf::from("data/CurrencyTypes.json"),
        }
    }
}

impl PackageSpec {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_packages() -> Vec<PackageSpec> {
    DEFAULT_PACKAGES
        .iter()
        .map(|(name, id)| PackageSpec::new(*name, *id))
        .collect()
}

impl ScratchConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse scratchkit config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Loads `scratchkit.toml` from the project root when present, otherwise
    /// the built-in defaults.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let path = layout.config_path();
        if path.exists() {
            return Self::read_from(&path);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(anyhow!("tool must not be empty"));
        }

        validate_path_not_empty("scratch.definition_file", &self.scratch.definition_file)?;
        validate_path_not_empty("scratch.pre_deploy_dir", &self.scratch.pre_deploy_dir)?;
        if !(1..=MAX_SCRATCH_DURATION_DAYS).contains(&self.scratch.duration_days) {
            return Err(anyhow!(
                "scratch.duration_days must be between 1 and {MAX_SCRATCH_DURATION_DAYS}, got {}",
                self.scratch.duration_days
            ));
        }
        if self.scratch.install_wait_minutes == 0 {
            return Err(anyhow!("scratch.install_wait_minutes must be greater than zero"));
        }

        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();
        for package in &self.packages {
            if package.name.trim().is_empty() {
                return Err(anyhow!("package name must not be empty (id '{}')", package.id));
            }
            validate_package_id(&package.id)
                .with_context(|| format!("invalid package id for '{}'", package.name))?;
            if !seen_names.insert(package.name.as_str()) {
                return Err(anyhow!("duplicate package declaration '{}'", package.name));
            }
            if !seen_ids.insert(package.id.as_str()) {
                return Err(anyhow!(
                    "package id '{}' is declared more than once",
                    package.id
                ));
            }
        }

        if self.currency.settings_files.is_empty() {
            return Err(anyhow!("currency.settings_files must list at least one file"));
        }
        for path in &self.currency.settings_files {
            validate_path_not_empty("currency.settings_files", path)?;
        }
        validate_path_not_empty("currency.data_file", &self.currency.data_file)?;

        Ok(())
    }
}

fn validate_path_not_empty(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(())
}

/// Package version ids are 15 or 18 ASCII alphanumerics starting with `04t`.
pub fn validate_package_id(id: &str) -> Result<()> {
    if !id.starts_with("04t") {
        return Err(anyhow!("package id must start with '04t': {id}"));
    }
    if id.len() != 15 && id.len() != 18 {
        return Err(anyhow!(
            "package id must be 15 or 18 characters long, got {}: {id}",
            id.len()
        ));
    }
    if id.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
        return Err(anyhow!("package id contains invalid character(s): {id}"));
    }
    Ok(())
}
