use crate::common::{stdout, ProjectFixture};

fn project_with_issues() -> ProjectFixture {
    let project = ProjectFixture::new("rrod");
    project.module("greet.py", "Say hello.");
    project.module("geo/geotiff.py", "GeoTIFF helpers.");
    project.write(
        "tests/test_greet.py",
        "\"\"\"Old docstring.\"\"\"\n\nimport pytest\n\n\ndef test_greet():\n    assert True\n",
    );
    project.write("docs/reference/greet.md", "# Greet\n\n::: rrod.old_name\n");
    project
}

#[test]
fn fix_writes_expected_files_and_second_run_is_clean() {
    let project = project_with_issues();

    let first = project.run(&["--fix"]);

    assert_eq!(first.status.code(), Some(1), "fixes still count as issues");
    let text = stdout(&first);
    assert_eq!(text.matches("- Fixed: ").count(), 4, "stdout:\n{text}");

    assert_eq!(
        project.read("tests/test_greet.py"),
        "\"\"\"Tests: Say hello.\"\"\"\n\nimport pytest\n\n\ndef test_greet():\n    assert True\n"
    );
    assert_eq!(
        project.read("tests/geo/test_geotiff.py"),
        "\"\"\"Tests: GeoTIFF helpers.\"\"\"\n"
    );
    assert_eq!(
        project.read("docs/reference/greet.md"),
        "# Greet\n\n::: rrod.greet\n"
    );
    assert_eq!(
        project.read("docs/reference/geo/geotiff.md"),
        "# GeoTIFF\n\n::: rrod.geo.geotiff\n"
    );

    let second = project.run(&[]);
    assert_eq!(second.status.code(), Some(0), "stdout:\n{}", stdout(&second));
}

#[test]
fn fix_does_not_remove_orphans() {
    let project = project_with_issues();
    let orphan = project.write("tests/test_gone.py", "\"\"\"Tests: Gone.\"\"\"\n");

    let output = project.run(&["--fix"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(orphan.exists());
    assert!(stdout(&output).contains("- Unexpected test file "));
}

#[test]
fn rm_removes_orphans_and_second_run_is_clean() {
    let project = project_with_issues();
    let orphan_test = project.write("tests/foo/test_bar.py", "\"\"\"Tests: Bar.\"\"\"\n");
    let orphan_ref = project.write("docs/reference/foo/bar.md", "# Bar\n\n::: rrod.foo.bar\n");

    let first = project.run(&["--fix", "--rm"]);

    assert_eq!(first.status.code(), Some(1));
    let text = stdout(&first);
    assert_eq!(text.matches("- Removed: Unexpected").count(), 2, "stdout:\n{text}");
    assert!(!orphan_test.exists());
    assert!(!orphan_ref.exists());

    let second = project.run(&["--rm"]);
    assert_eq!(second.status.code(), Some(0), "stdout:\n{}", stdout(&second));
    assert_eq!(stdout(&second).trim(), "All checks passed!");
}
