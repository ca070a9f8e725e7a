use std::process::Command;

use crate::common::{stderr, stdout, ProjectFixture, BINARY_PATH};

fn run_config(project: &ProjectFixture, extra: &[&str]) -> std::process::Output {
    Command::new(BINARY_PATH)
        .arg("config")
        .arg(project.root())
        .args(extra)
        .env_remove("CODEGUARD_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("codeguard should run")
}

#[test]
fn config_command_prints_defaults() {
    let project = ProjectFixture::new("rrod");

    let output = run_config(&project, &[]);

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("[layout]"), "stdout:\n{text}");
    assert!(text.contains("tests_dir_name = \"tests\""), "stdout:\n{text}");
    assert!(text.contains("module_extension = \"py\""), "stdout:\n{text}");
}

#[test]
fn config_command_reflects_file_and_flags() {
    let project = ProjectFixture::new("rrod");
    project.write(
        "codeguard.toml",
        "[layout]\ntests_dir_name = \"checks\"\n\n[conventions]\ntest_prefix = \"check_\"\n",
    );

    let output = run_config(&project, &["--docs-dir-name", "site"]);

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("tests_dir_name = \"checks\""), "stdout:\n{text}");
    assert!(text.contains("docs_dir_name = \"site\""), "stdout:\n{text}");
    assert!(text.contains("test_prefix = \"check_\""), "stdout:\n{text}");
}

#[test]
fn project_config_file_drives_the_check() {
    let project = ProjectFixture::new("rrod");
    std::fs::create_dir_all(project.path("checks")).expect("create checks dir");
    project.write(
        "codeguard.toml",
        "[layout]\ntests_dir_name = \"checks\"\n\n[conventions]\ntest_prefix = \"check_\"\n",
    );
    project.module("greet.py", "Say hello.");
    project.write("checks/check_greet.py", "\"\"\"Tests: Say hello.\"\"\"\n");
    project.write("docs/reference/greet.md", "# Greet\n\n::: rrod.greet\n");

    let output = project.run(&[]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
}

#[test]
fn invalid_config_is_fatal() {
    let project = ProjectFixture::new("rrod");
    project.write("codeguard.toml", "[conventions]\ndoc_extension = \".md\"\n");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("has invalid `conventions.doc_extension`"),
        "stderr:\n{}",
        stderr(&output)
    );
}
