use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use scratchkit_core::{ensure_path_exists, CommandRunner, ToolInvocation};

use crate::context::{ProjectContext, CURRENCY_BIN_NAME};
use crate::render::TerminalRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub alias: String,
    pub dev_hub_alias: String,
}

/// Creates the scratch org, deploys the pre-dependency metadata, installs
/// every configured package in order and hands the org to the currency
/// binary. Stops at the first failing step; completed steps are left in
/// place.
pub fn run_provision_command(
    context: &ProjectContext,
    request: &ProvisionRequest,
    currency_program: &Path,
    runner: &dyn CommandRunner,
    renderer: TerminalRenderer,
) -> Result<()> {
    let config = &context.config;
    let layout = &context.layout;
    let tool = context.tool();
    let definition_file = layout.scratch_definition_path(config);
    let pre_deploy_dir = layout.pre_deploy_dir(config);

    ensure_path_exists(&definition_file)?;
    ensure_path_exists(&pre_deploy_dir)?;

    renderer.print_status("ok", "Creating scratch org");
    runner.run(&tool.create_scratch(
        &definition_file,
        &request.alias,
        &request.dev_hub_alias,
        config.scratch.duration_days,
    ))?;
    renderer.print_status(
        "ok",
        &format!("Scratch org created with alias: {}", request.alias),
    );

    renderer.print_status("ok", "Deploying pre-dependency for NPSP packages");
    runner.run(&tool.deploy_source(
        &pre_deploy_dir,
        &request.alias,
        "Failed to deploy pre-dependency",
    ))?;

    renderer.print_section("NPSP packages");
    renderer.print_status("ok", "Starting Installation of NPSP Packages");
    let total = config.packages.len();
    let started_at = Instant::now();
    for (index, package) in config.packages.iter().enumerate() {
        renderer.print_status(
            "ok",
            &format!(
                "Installing {} with version ID {}",
                package.name, package.id
            ),
        );
        runner.run(&tool.install_package(
            package,
            &request.alias,
            config.scratch.install_wait_minutes,
        ))?;
        renderer.print_install_progress(&package.name, index + 1, total, started_at.elapsed());
    }

    renderer.print_status(
        "ok",
        "Enabling Multicurrency and Advanced Currency Management",
    );
    renderer.print_status("ok", &format!("Executing {CURRENCY_BIN_NAME}"));
    runner.run(&currency_invocation(currency_program, &request.alias))?;
    renderer.print_status(
        "ok",
        &format!("Completed {CURRENCY_BIN_NAME} execution"),
    );

    Ok(())
}

/// The child call that enables multi-currency on the new org. It runs in the
/// same working directory, so it picks up the same `scratchkit.toml`.
pub fn currency_invocation(program: &Path, alias: &str) -> ToolInvocation {
    ToolInvocation::new(program, format!("Failed to execute {CURRENCY_BIN_NAME}")).arg(alias)
}
