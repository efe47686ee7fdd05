mod config;
mod invocation;
mod layout;
mod preflight;
mod runner;

pub use config::{
    validate_package_id, CurrencySettings, PackageSpec, ScratchConfig, ScratchSettings,
    DEFAULT_TOOL, MAX_SCRATCH_DURATION_DAYS,
};
pub use invocation::{OrgTool, ToolInvocation};
pub use layout::{ProjectLayout, CONFIG_FILE_NAME};
pub use preflight::{ensure_path_exists, ensure_paths_exist, inspect_import_file, ImportPlanSummary};
pub use runner::{CommandRunner, ProcessRunner};

#[cfg(test)]
mod tests;
