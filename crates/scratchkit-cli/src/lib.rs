use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use scratchkit_core::{ProcessRunner, ProjectLayout};

mod args;
mod context;
mod currency;
mod provision;
mod render;

pub use args::{parse_cli, CurrencyCli, ProvisionCli, FAILURE_EXIT_CODE};
pub use context::{sibling_binary_path, ProjectContext, CURRENCY_BIN_NAME};
pub use currency::run_currency_command;
pub use provision::{currency_invocation, run_provision_command, ProvisionRequest};
pub use render::{
    current_output_style, render_install_progress_line, render_section_header,
    render_status_line, OutputStyle, TerminalRenderer,
};

pub fn provision_main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_cli::<ProvisionCli, _, _>(args) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };
    let renderer = TerminalRenderer::current();
    finish(run_provision_cli(cli, renderer), renderer)
}

pub fn currency_main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_cli::<CurrencyCli, _, _>(args) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };
    let renderer = TerminalRenderer::current();
    finish(run_currency_cli(cli, renderer), renderer)
}

fn run_provision_cli(cli: ProvisionCli, renderer: TerminalRenderer) -> Result<()> {
    let context = ProjectContext::load(ProjectLayout::from_current_dir()?)?;
    let currency_program = sibling_binary_path(CURRENCY_BIN_NAME)?;
    let request = ProvisionRequest {
        alias: cli.alias,
        dev_hub_alias: cli.dev_hub_alias,
    };
    run_provision_command(
        &context,
        &request,
        &currency_program,
        &ProcessRunner,
        renderer,
    )
}

fn run_currency_cli(cli: CurrencyCli, renderer: TerminalRenderer) -> Result<()> {
    let context = ProjectContext::load(ProjectLayout::from_current_dir()?)?;
    run_currency_command(&context, &cli.alias, &ProcessRunner, renderer)
}

fn finish(result: Result<()>, renderer: TerminalRenderer) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            renderer.print_failure(&err);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}
