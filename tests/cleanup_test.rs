//! Scratch files and build directories never outlive an execution.
//!
//! Kept in its own test binary: it points `TMPDIR` at a private directory,
//! which would leak into tests running in parallel.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
};

use anyhow::Result;
use code_tutor::{
    config::Config,
    execution::{ExecutionStatus, Executor, Registry},
};

fn has_tool(program: &str, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Entries this crate created under `dir`.
fn residue(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with("tutor-") {
            names.push(name);
        }
    }
    Ok(names)
}

#[tokio::test]
async fn temp_resources_are_removed_on_every_path() -> Result<()> {
    let scratch = tempfile::tempdir()?;
    std::env::set_var("TMPDIR", scratch.path());

    let cfg = Config::with_values([("EXECUTION_TIMEOUT", "1")]);
    let exec = Executor::new(Registry::from_config(&cfg));

    if has_tool("python3", "--version") {
        let ok = exec.execute("Python", "print('hi')").await?;
        assert!(ok.succeeded());
        let crash = exec.execute("Python", "raise SystemExit(2)").await?;
        assert_eq!(crash.status, ExecutionStatus::RuntimeFailed);
        let stuck = exec.execute("Python", "while True:\n    pass\n").await?;
        assert_eq!(stuck.status, ExecutionStatus::TimedOut);
    }
    if has_tool("g++", "--version") {
        let ok = exec.execute("C++", "int main() { return 0; }").await?;
        assert!(ok.succeeded());
        let broken = exec.execute("C++", "int main() { return 0 }").await?;
        assert_eq!(broken.status, ExecutionStatus::CompileFailed);
    }
    if has_tool("javac", "-version") && has_tool("java", "-version") {
        let code = "public class Main { public static void main(String[] a) { System.out.println(1); } }";
        let ok = exec.execute("Java", code).await?;
        assert!(ok.succeeded());
    }

    // Spawn failures happen after the scratch file is written.
    let missing = Config::with_values([("PYTHON_BIN", "python-binary-that-does-not-exist")]);
    let failed = Executor::new(Registry::from_config(&missing))
        .execute("Python", "print(1)")
        .await?;
    assert_eq!(failed.status, ExecutionStatus::ToolchainFailed);

    assert_eq!(residue(scratch.path())?, Vec::<String>::new());
    Ok(())
}
