use super::*;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn default_config_declares_packages_in_install_order() {
    let config = ScratchConfig::default();
    let declared = config
        .packages
        .iter()
        .map(|package| (package.name.as_str(), package.id.as_str()))
        .collect::<Vec<_>>();

    assert_eq!(
        declared,
        vec![
            ("Contacts & Organizations", "04t80000000gYcfAAE"),
            ("Household", "04t80000000jYrOAAU"),
            ("Affiliations", "04t80000001AVBMAA4"),
            ("Relationships", "04t80000000tpCGAAY"),
            ("Recurring Donations", "04t80000000tpCBAAY"),
            ("Nonprofit Success Pack", "04t1Y000001I8yUQAS"),
        ]
    );
    config.validate().expect("default config must validate");
}

#[test]
fn config_without_sections_falls_back_to_defaults() {
    let config = ScratchConfig::from_toml_str("").expect("empty config must parse");
    assert_eq!(config, ScratchConfig::default());
}

#[test]
fn config_overrides_only_the_sections_it_names() {
    let config = ScratchConfig::from_toml_str(
        r#"
tool = "/opt/sf/bin/sf"

[scratch]
duration_days = 7
"#,
    )
    .expect("partial config must parse");

    assert_eq!(config.tool, "/opt/sf/bin/sf");
    assert_eq!(config.scratch.duration_days, 7);
    assert_eq!(config.scratch.install_wait_minutes, 15);
    assert_eq!(
        config.scratch.definition_file,
        PathBuf::from("config/project-scratch-def.json")
    );
    assert_eq!(config.packages.len(), 6);
    assert_eq!(config.currency, CurrencySettings::default());
}

#[test]
fn config_package_list_replaces_default_table() {
    let config = ScratchConfig::from_toml_str(
        r#"
[[packages]]
name = "Household"
id = "04t80000000jYrOAAU"

[[packages]]
name = "Contacts & Organizations"
id = "04t80000000gYcfAAE"
"#,
    )
    .expect("package table must parse");

    let names = config
        .packages
        .iter()
        .map(|package| package.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Household", "Contacts & Organizations"]);
}

#[test]
fn config_rejects_duplicate_package_name() {
    let err = ScratchConfig::from_toml_str(
        r#"
[[packages]]
name = "Household"
id = "04t80000000jYrOAAU"

[[packages]]
name = "Household"
id = "04t80000000gYcfAAE"
"#,
    )
    .expect_err("duplicate package name must fail");
    assert!(
        err.to_string().contains("duplicate package declaration 'Household'"),
        "unexpected error: {err}"
    );
}

#[test]
fn config_rejects_duplicate_package_id() {
    let err = ScratchConfig::from_toml_str(
        r#"
[[packages]]
name = "Household"
id = "04t80000000jYrOAAU"

[[packages]]
name = "Household Again"
id = "04t80000000jYrOAAU"
"#,
    )
    .expect_err("duplicate package id must fail");
    assert!(err.to_string().contains("declared more than once"));
}

#[test]
fn config_rejects_malformed_package_id() {
    let err = ScratchConfig::from_toml_str(
        r#"
[[packages]]
name = "Household"
id = "033000000000001"
"#,
    )
    .expect_err("non-package id must fail");
    assert!(err.to_string().contains("invalid package id for 'Household'"));
}

#[test]
fn config_rejects_duration_beyond_scratch_org_limit() {
    let err = ScratchConfig::from_toml_str("[scratch]\nduration_days = 31\n")
        .expect_err("duration over limit must fail");
    assert!(err
        .to_string()
        .contains("scratch.duration_days must be between 1 and 30, got 31"));
}

#[test]
fn config_rejects_zero_install_wait() {
    let err = ScratchConfig::from_toml_str("[scratch]\ninstall_wait_minutes = 0\n")
        .expect_err("zero wait must fail");
    assert!(err.to_string().contains("install_wait_minutes"));
}

#[test]
fn config_rejects_empty_settings_list() {
    let err = ScratchConfig::from_toml_str("[currency]\nsettings_files = []\n")
        .expect_err("empty settings list must fail");
    assert!(err.to_string().contains("at least one file"));
}

#[test]
fn config_rejects_blank_tool() {
    let err = ScratchConfig::from_toml_str("tool = \"  \"\n").expect_err("blank tool must fail");
    assert!(err.to_string().contains("tool must not be empty"));
}

#[test]
fn validate_package_id_accepts_fifteen_and_eighteen_character_ids() {
    validate_package_id("04t80000000gYcf").expect("15-char id must validate");
    validate_package_id("04t80000000gYcfAAE").expect("18-char id must validate");
}

#[test]
fn validate_package_id_rejects_non_alphanumeric_characters() {
    let err = validate_package_id("04t80000000gY-fAAE").expect_err("dash must fail");
    assert!(err.to_string().contains("invalid character"));
}

#[test]
fn load_uses_defaults_when_no_config_file_exists() {
    let root = test_project_root();
    let layout = ProjectLayout::new(&root);

    let config = ScratchConfig::load(&layout).expect("must load defaults");
    assert_eq!(config, ScratchConfig::default());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_discovers_config_in_project_root() {
    let root = test_project_root();
    let layout = ProjectLayout::new(&root);
    assert_eq!(layout.config_path(), root.join(CONFIG_FILE_NAME));
    fs::write(layout.config_path(), "tool = \"sfdx\"\n").expect("must write config");

    let config = ScratchConfig::load(&layout).expect("must load config");
    assert_eq!(config.tool, "sfdx");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_reports_config_path_when_parse_fails() {
    let root = test_project_root();
    let layout = ProjectLayout::new(&root);
    fs::write(layout.config_path(), "tool = [").expect("must write config");

    let err = ScratchConfig::load(&layout).expect_err("broken config must fail");
    assert!(err.to_string().starts_with("invalid config:"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn layout_resolves_relative_paths_against_root_and_keeps_absolute_paths() {
    let layout = ProjectLayout::new("/work/project");
    assert_eq!(
        layout.resolve("data/CurrencyTypes.json"),
        PathBuf::from("/work/project/data/CurrencyTypes.json")
    );
    assert_eq!(
        layout.resolve("/etc/scratch-def.json"),
        PathBuf::from("/etc/scratch-def.json")
    );

    let config = ScratchConfig::default();
    assert_eq!(
        layout.currency_settings_paths(&config),
        vec![
            PathBuf::from("/work/project/metadata/post/MultiCurrency/Currency.settings-meta.xml"),
            PathBuf::from(
                "/work/project/metadata/post/CurrencyEffectiveDates/Currency.settings-meta.xml"
            ),
        ]
    );
}

#[test]
fn org_tool_builds_scratch_create_invocation() {
    let tool = OrgTool::new("sf");
    let invocation = tool.create_scratch(
        Path::new("/p/config/project-scratch-def.json"),
        "orgA",
        "hubA",
        30,
    );

    assert_eq!(invocation.program(), "sf");
    assert_eq!(
        invocation.args_lossy(),
        vec![
            "org",
            "create",
            "scratch",
            "--definition-file",
            "/p/config/project-scratch-def.json",
            "--alias",
            "orgA",
            "--set-default",
            "--target-dev-hub",
            "hubA",
            "--no-namespace",
            "--duration-days",
            "30",
        ]
    );
    assert_eq!(invocation.failure_label(), "Failed to create scratch org");
}

#[test]
fn org_tool_builds_package_install_invocation() {
    let tool = OrgTool::new("sf");
    let package = PackageSpec::new("Household", "04t80000000jYrOAAU");
    let invocation = tool.install_package(&package, "orgA", 15);

    assert_eq!(
        invocation.command_line(),
        "sf package install --package 04t80000000jYrOAAU --target-org orgA --wait 15 --no-prompt"
    );
    assert_eq!(invocation.failure_label(), "Failed to install Household");
}

#[test]
fn org_tool_builds_data_import_invocation() {
    let tool = OrgTool::new("sf");
    let invocation = tool.import_tree(Path::new("/p/data/CurrencyTypes.json"), "orgA");

    assert_eq!(
        invocation.command_line(),
        "sf data import tree --files /p/data/CurrencyTypes.json --target-org orgA"
    );
    assert_eq!(
        invocation.failure_label(),
        "Failed to import currencies from /p/data/CurrencyTypes.json"
    );
}

#[test]
fn command_line_quotes_arguments_with_whitespace() {
    let invocation = ToolInvocation::new("sf", "label")
        .arg("--source-dir")
        .arg("/my project/it's here");
    assert_eq!(
        invocation.command_line(),
        "sf --source-dir '/my project/it'\\''s here'"
    );
}

#[test]
fn ensure_paths_exist_reports_first_missing_path() {
    let root = test_project_root();
    let present = root.join("present.xml");
    let missing = root.join("missing.xml");
    fs::write(&present, "<xml/>").expect("must write file");

    let err = ensure_paths_exist(&[present.clone(), missing.clone(), root.join("other.xml")])
        .expect_err("missing file must fail");
    assert_eq!(
        err.to_string(),
        format!("Error: {} does not exist.", missing.display())
    );
    ensure_paths_exist(&[present]).expect("present file must pass");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn ensure_path_exists_accepts_files_and_directories() {
    let root = test_project_root();
    let file = root.join("npsp-dependencies");
    fs::write(&file, "").expect("must write file");

    ensure_path_exists(&file).expect("a file is a valid source path");
    ensure_path_exists(&root).expect("a directory is a valid source path");
    let err = ensure_path_exists(&root.join("absent")).expect_err("absent path must fail");
    assert!(err.to_string().ends_with("does not exist."));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn inspect_import_file_counts_records() {
    let root = test_project_root();
    let data = root.join("CurrencyTypes.json");
    fs::write(
        &data,
        r#"{"records":[
            {"attributes":{"type":"CurrencyType","referenceId":"ref1"},"IsoCode":"EUR","ConversionRate":0.9},
            {"attributes":{"type":"CurrencyType","referenceId":"ref2"},"IsoCode":"GBP","ConversionRate":0.8}
        ]}"#,
    )
    .expect("must write data file");

    let summary = inspect_import_file(&data).expect("must inspect data file");
    assert_eq!(summary.record_count, 2);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn inspect_import_file_explains_unreadable_payloads() {
    let root = test_project_root();
    let data = root.join("CurrencyTypes.json");
    fs::write(&data, r#"[{"IsoCode":"EUR"}]"#).expect("must write data file");

    let err = inspect_import_file(&data).expect_err("bare array has no records key");
    assert!(err.to_string().contains("no top-level 'records' array"));

    fs::write(&data, "{not json").expect("must write data file");
    let err = inspect_import_file(&data).expect_err("invalid json must fail");
    assert!(err.to_string().starts_with("failed to parse data file:"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn process_runner_reports_failure_label_and_status() {
    let invocation = ToolInvocation::new(current_test_binary(), "Failed to run test harness")
        .arg("--definitely-not-a-test-harness-flag");

    let err = ProcessRunner
        .run(&invocation)
        .expect_err("unknown harness flag must exit non-zero");
    assert_eq!(err.to_string(), "Failed to run test harness");
    let detail = format!("{err:#}");
    assert!(detail.contains("status="), "unexpected error: {detail}");
}

#[test]
fn process_runner_reports_launch_failure_under_failure_label() {
    let root = test_project_root();
    let invocation = ToolInvocation::new(root.join("no-such-tool"), "Failed to create scratch org");

    let err = ProcessRunner
        .run(&invocation)
        .expect_err("missing program must fail");
    assert_eq!(err.to_string(), "Failed to create scratch org");
    assert!(format!("{err:#}").contains("command failed to start"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn recording_runner_sees_invocations_through_trait_object() {
    let runner = RecordingRunner::default();
    let tool = OrgTool::new("sf");
    let seam: &dyn CommandRunner = &runner;

    seam.run(&tool.deploy_source(Path::new("/p/pre"), "orgA", "Failed to deploy pre-dependency"))
        .expect("recording runner must succeed");

    let recorded = runner.recorded.borrow();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].failure_label(), "Failed to deploy pre-dependency");
}

#[derive(Default)]
struct RecordingRunner {
    recorded: RefCell<Vec<ToolInvocation>>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> anyhow::Result<()> {
        self.recorded.borrow_mut().push(invocation.clone());
        Ok(())
    }
}

fn current_test_binary() -> PathBuf {
    std::env::current_exe().expect("must resolve test binary")
}

fn test_project_root() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!(
        "scratchkit-core-test-{}-{nanos}-{seq}",
        std::process::id()
    ));
    fs::create_dir_all(&path).expect("must create test root");
    path
}
