use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use crate::config::{PackageSpec, ScratchConfig};

/// One external command plus the label reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: OsString,
    args: Vec<OsString>,
    failure_label: String,
}

impl ToolInvocation {
    pub fn new(program: impl Into<OsString>, failure_label: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            failure_label: failure_label.into(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn failure_label(&self) -> &str {
        &self.failure_label
    }

    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    pub fn command_line(&self) -> String {
        let mut parts = vec![quote_for_display(&self.program.to_string_lossy())];
        parts.extend(self.args.iter().map(|arg| quote_for_display(&arg.to_string_lossy())));
        parts.join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

fn quote_for_display(value: &str) -> String {
    if !value.is_empty() && !value.chars().any(|ch| ch.is_whitespace() || ch == '\'' || ch == '"') {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Builds the `sf` calls both pipelines make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgTool {
    program: String,
}

impl OrgTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &ScratchConfig) -> Self {
        Self::new(config.tool.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn create_scratch(
        &self,
        definition_file: &Path,
        alias: &str,
        dev_hub_alias: &str,
        duration_days: u32,
    ) -> ToolInvocation {
        ToolInvocation::new(&self.program, "Failed to create scratch org")
            .arg("org")
            .arg("create")
            .arg("scratch")
            .arg("--definition-file")
            .arg(definition_file)
            .arg("--alias")
            .arg(alias)
            .arg("--set-default")
            .arg("--target-dev-hub")
            .arg(dev_hub_alias)
            .arg("--no-namespace")
            .arg("--duration-days")
            .arg(duration_days.to_string())
    }

    pub fn deploy_source(
        &self,
        source: &Path,
        alias: &str,
        failure_label: impl Into<String>,
    ) -> ToolInvocation {
        ToolInvocation::new(&self.program, failure_label)
            .arg("project")
            .arg("deploy")
            .arg("start")
            .arg("--source-dir")
            .arg(source)
            .arg("--target-org")
            .arg(alias)
    }

    pub fn install_package(
        &self,
        package: &PackageSpec,
        alias: &str,
        wait_minutes: u32,
    ) -> ToolInvocation {
        ToolInvocation::new(&self.program, format!("Failed to install {}", package.name))
            .arg("package")
            .arg("install")
            .arg("--package")
            .arg(&package.id)
            .arg("--target-org")
            .arg(alias)
            .arg("--wait")
            .arg(wait_minutes.to_string())
            .arg("--no-prompt")
    }

    pub fn import_tree(&self, data_file: &Path, alias: &str) -> ToolInvocation {
        ToolInvocation::new(
            &self.program,
            format!("Failed to import currencies from {}", data_file.display()),
        )
        .arg("data")
        .arg("import")
        .arg("tree")
        .arg("--files")
        .arg(data_file)
        .arg("--target-org")
        .arg(alias)
    }
}
