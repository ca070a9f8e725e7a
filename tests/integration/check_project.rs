use serde_json::Value;

use crate::common::{stderr, stdout, ProjectFixture};

const CLI_REF: &str = "# CLI\n\n::: mkdocs-click\n    :module: rrod.cli\n    :command: cli\n    :prog_name: rrod\n    :style: table\n";

fn clean_project() -> ProjectFixture {
    let project = ProjectFixture::new("rrod");
    project.module("greet.py", "Say hello.");
    project.module("cli.py", "Command-line interface.");
    project.write("src/rrod/__init__.py", "");
    project.write("tests/test_greet.py", "\"\"\"Tests: Say hello.\"\"\"\n\ndef test_greet():\n    pass\n");
    project.write("docs/reference/greet.md", "# Greet\n\n::: rrod.greet\n");
    project.write("docs/reference/cli.md", CLI_REF);
    project
}

#[test]
fn clean_project_passes() {
    let project = clean_project();

    let output = project.run(&[]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    assert_eq!(stdout(&output).trim(), "All checks passed!");
}

#[test]
fn missing_files_are_reported_without_changes() {
    let project = clean_project();
    project.module("io/reader.py", "Read things.");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("rrod.io.reader:"), "stdout:\n{text}");
    assert!(text.contains("- Could not find test file "), "stdout:\n{text}");
    assert!(text.contains("tests/io/test_reader.py."), "stdout:\n{text}");
    assert!(
        text.contains("- Could not find API reference documentation file "),
        "stdout:\n{text}"
    );
    assert!(!project.path("tests/io/test_reader.py").exists());
    assert!(!project.path("docs/reference/io/reader.md").exists());
}

#[test]
fn docstring_mismatch_shows_expected_and_found() {
    let project = clean_project();
    project.write("tests/test_greet.py", "\"\"\"Greeting tests.\"\"\"\n");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Docstring mismatch in test file"), "stdout:\n{text}");
    assert!(text.contains("  Expected: \"\"\"Tests: Say hello.\"\"\""), "stdout:\n{text}");
    assert!(text.contains("  Found: \"\"\"Greeting tests.\"\"\""), "stdout:\n{text}");
}

#[test]
fn orphan_files_are_listed_under_unexpected_files() {
    let project = clean_project();
    project.write("tests/foo/test_bar.py", "\"\"\"Tests: Bar.\"\"\"\n");
    project.write("docs/reference/old.md", "# Old\n\n::: rrod.old\n");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    let unexpected = text
        .split("Unexpected files:\n")
        .nth(1)
        .unwrap_or_else(|| panic!("missing unexpected section:\n{text}"));
    let lines = unexpected.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2, "stdout:\n{text}");
    assert!(lines[0].starts_with("- Unexpected test file "));
    assert!(lines[0].ends_with("tests/foo/test_bar.py."));
    assert!(lines[1].starts_with("- Unexpected API reference documentation file "));
    assert!(project.path("tests/foo/test_bar.py").exists());
}

#[test]
fn entry_point_needs_no_test_file() {
    let project = clean_project();
    assert!(!project.path("tests/test_cli.py").exists());

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(0), "stdout:\n{}", stdout(&output));
}

#[test]
fn missing_tests_dir_is_fatal() {
    let project = clean_project();
    std::fs::remove_dir_all(project.path("tests")).expect("remove tests dir");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Could not find test directory"),
        "stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn module_without_docstring_is_fatal() {
    let project = clean_project();
    project.write("src/rrod/broken.py", "import os\n");

    let output = project.run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Missing docstring in module file"),
        "stderr:\n{}",
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
}

#[test]
fn ambiguous_modules_dir_needs_a_name() {
    let project = clean_project();
    std::fs::create_dir_all(project.path("src/other")).expect("create second package");

    let inferred = project.run(&[]);
    assert_eq!(inferred.status.code(), Some(2));
    assert!(
        stderr(&inferred).contains("Expected a single modules source directory"),
        "stderr:\n{}",
        stderr(&inferred)
    );

    let named = project.run(&["rrod"]);
    assert_eq!(named.status.code(), Some(0), "stderr:\n{}", stderr(&named));
}

#[test]
fn json_report_is_machine_readable() {
    let project = clean_project();
    project.write("docs/reference/greet.md", "# Greetings\n");

    let output = project.run(&["--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    assert_eq!(value["had_issues"], true);
    assert_eq!(value["modules"][0]["qualname"], "rrod.greet");
    assert_eq!(value["modules"][0]["outcomes"][0]["status"], "unresolved");
    assert!(value["modules"][0]["outcomes"][0]["message"]
        .as_str()
        .is_some_and(|message| message.starts_with("Content mismatch")));
    assert_eq!(value["unexpected_files"], Value::Array(Vec::new()));
}
