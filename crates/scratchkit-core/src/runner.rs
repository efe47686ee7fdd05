use std::process::Stdio;

use anyhow::{anyhow, Context, Result};

use crate::invocation::ToolInvocation;

pub trait CommandRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<()>;
}

/// Runs invocations as child processes sharing this process's terminal, so
/// the tool's prompts and progress output stay visible.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        let command_line = invocation.command_line();
        let status = invocation
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("command failed to start: {command_line}"))
            .with_context(|| invocation.failure_label().to_string())?;
        if status.success() {
            return Ok(());
        }

        Err(anyhow!("status={status} command='{command_line}'"))
            .context(invocation.failure_label().to_string())
    }
}
