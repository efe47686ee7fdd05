use anyhow::Result;
use scratchkit_core::{ensure_path_exists, ensure_paths_exist, inspect_import_file, CommandRunner};

use crate::context::ProjectContext;
use crate::render::TerminalRenderer;

/// Deploys the currency settings files one by one, then imports the
/// currency types data file. Every settings file must exist before the
/// first deploy.
pub fn run_currency_command(
    context: &ProjectContext,
    alias: &str,
    runner: &dyn CommandRunner,
    renderer: TerminalRenderer,
) -> Result<()> {
    let config = &context.config;
    let layout = &context.layout;
    let tool = context.tool();
    let settings_files = layout.currency_settings_paths(config);

    ensure_paths_exist(&settings_files)?;

    renderer.print_status("ok", &format!("Deploying currency settings to {alias}..."));
    for settings_file in &settings_files {
        runner.run(&tool.deploy_source(
            settings_file,
            alias,
            format!("Failed to deploy {}", settings_file.display()),
        ))?;
    }
    renderer.print_status("ok", "Deployment complete.");

    let data_file = layout.currency_data_path(config);
    ensure_path_exists(&data_file)?;

    let message = match inspect_import_file(&data_file) {
        Ok(summary) => format!(
            "Importing {} currency records from {} to {alias}...",
            summary.record_count,
            data_file.display()
        ),
        Err(err) => {
            renderer.print_status("warn", &format!("{err:#}"));
            format!("Importing currencies from {} to {alias}...", data_file.display())
        }
    };
    renderer.print_status("ok", &message);
    runner.run(&tool.import_tree(&data_file, alias))?;
    renderer.print_status("ok", "Currency import complete.");

    Ok(())
}
