use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_codeguard");

/// Throwaway project with `src/<package>`, `tests` and `docs/reference`.
pub struct ProjectFixture {
    temp: TempDir,
    package: &'static str,
}

impl ProjectFixture {
    pub fn new(package: &'static str) -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        for dir in [
            format!("src/{package}"),
            "tests".to_string(),
            "docs/reference".to_string(),
        ] {
            fs::create_dir_all(temp.path().join(dir)).expect("create project dir");
        }
        Self { temp, package }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn module(&self, relative: &str, docstring: &str) -> PathBuf {
        self.write(
            &format!("src/{}/{relative}", self.package),
            &format!("\"\"\"{docstring}\"\"\"\n\nVALUE = 1\n"),
        )
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read fixture file")
    }

    /// Run the binary against this project with extra arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(BINARY_PATH)
            .arg(self.root())
            .args(args)
            .env_remove("CODEGUARD_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .expect("codeguard should run")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
