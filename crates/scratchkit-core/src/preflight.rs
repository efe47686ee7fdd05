use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// Accepts anything present at `path`; `sf --source-dir` takes files and
/// directories alike.
pub fn ensure_path_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("Error: {} does not exist.", path.display()));
    }
    Ok(())
}

/// Fails on the first missing path, in the order given.
pub fn ensure_paths_exist<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        ensure_path_exists(path.as_ref())?;
    }
    Ok(())
}

/// Summary of a tree-import data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportPlanSummary {
    pub record_count: usize,
}

/// Reads a `data import tree` file and counts its top-level `records`.
/// Callers treat failure here as informational; `sf` is the judge of the
/// file's contents.
pub fn inspect_import_file(path: &Path) -> Result<ImportPlanSummary> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse data file: {}", path.display()))?;

    let Some(records) = value.get("records").and_then(Value::as_array) else {
        return Err(anyhow!(
            "data file has no top-level 'records' array: {}",
            path.display()
        ));
    };

    Ok(ImportPlanSummary {
        record_count: records.len(),
    })
}
