use std::process::{Command, Stdio};

use anyhow::Result;
use code_tutor::{
    config::Config,
    execution::{ExecutionStatus, Executor, Registry},
};

/// Tests needing a toolchain skip when it is not installed.
fn has_tool(program: &str, version_flag: &str) -> bool {
    let found = Command::new(program)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok();
    if !found {
        println!("{} not found on PATH, skipping", program);
    }
    found
}

fn executor() -> Executor {
    Executor::new(Registry::default())
}

#[tokio::test]
async fn python_prints_hello() -> Result<()> {
    if !has_tool("python3", "--version") {
        return Ok(());
    }
    let result = executor().execute("Python", "print(\"hello\")").await?;
    assert_eq!(result.stdout.as_deref(), Some("hello\n"));
    assert_eq!(result.stderr.as_deref(), Some(""));
    assert_eq!(result.status, ExecutionStatus::Succeeded);
    assert_eq!(result.exit_code, Some(0));
    Ok(())
}

#[tokio::test]
async fn python_exception_is_a_runtime_failure() -> Result<()> {
    if !has_tool("python3", "--version") {
        return Ok(());
    }
    let result = executor()
        .execute("Python", "print('before')\nraise ValueError('boom')")
        .await?;
    assert_eq!(result.stdout.as_deref(), Some("before\n"));
    assert!(result.stderr_text().contains("ValueError: boom"));
    assert_eq!(result.status, ExecutionStatus::RuntimeFailed);
    assert_eq!(result.exit_code, Some(1));
    Ok(())
}

#[tokio::test]
async fn stderr_warnings_do_not_fail_a_clean_exit() -> Result<()> {
    if !has_tool("python3", "--version") {
        return Ok(());
    }
    let code = "import sys\nsys.stderr.write('warning: careful\\n')\nprint('done')";
    let result = executor().execute("python", code).await?;
    assert_eq!(result.stdout.as_deref(), Some("done\n"));
    assert_eq!(result.stderr.as_deref(), Some("warning: careful\n"));
    assert!(result.succeeded());
    Ok(())
}

#[tokio::test]
async fn javascript_prints_hello() -> Result<()> {
    if !has_tool("node", "--version") {
        return Ok(());
    }
    let result = executor().execute("JavaScript", "console.log('hello')").await?;
    assert_eq!(result.stdout.as_deref(), Some("hello\n"));
    assert_eq!(result.stderr.as_deref(), Some(""));
    assert!(result.succeeded());
    Ok(())
}

#[tokio::test]
async fn cpp_compiles_and_runs() -> Result<()> {
    if !has_tool("g++", "--version") {
        return Ok(());
    }
    let code = "#include <iostream>\nint main() { std::cout << \"hello from c++\" << std::endl; return 0; }\n";
    let result = executor().execute("C++", code).await?;
    assert_eq!(result.stdout.as_deref(), Some("hello from c++\n"));
    assert!(result.succeeded());
    Ok(())
}

#[tokio::test]
async fn cpp_syntax_error_never_runs() -> Result<()> {
    if !has_tool("g++", "--version") {
        return Ok(());
    }
    let result = executor().execute("cpp", "int main() { return 0 }").await?;
    assert!(result.stdout.is_none());
    assert!(!result.stderr_text().is_empty());
    assert_eq!(result.status, ExecutionStatus::CompileFailed);
    Ok(())
}

#[tokio::test]
async fn java_compiles_and_runs() -> Result<()> {
    if !has_tool("javac", "-version") || !has_tool("java", "-version") {
        return Ok(());
    }
    let code = "public class Main {\n  public static void main(String[] args) {\n    System.out.println(\"hello from java\");\n  }\n}\n";
    let result = executor().execute("Java", code).await?;
    assert_eq!(result.stdout.as_deref().map(str::trim_end), Some("hello from java"));
    assert!(result.succeeded());
    Ok(())
}

#[tokio::test]
async fn java_syntax_error_never_runs() -> Result<()> {
    if !has_tool("javac", "-version") {
        return Ok(());
    }
    let code = "public class Main { public static void main(String[] args) { int x = ; } }";
    let result = executor().execute("Java", code).await?;
    assert!(result.stdout.is_none());
    assert!(result.stderr_text().contains("Main.java"));
    assert_eq!(result.status, ExecutionStatus::CompileFailed);
    Ok(())
}

#[tokio::test]
async fn concurrent_java_runs_do_not_collide() -> Result<()> {
    if !has_tool("javac", "-version") || !has_tool("java", "-version") {
        return Ok(());
    }
    let exec = executor();
    let program = |n: u32| {
        format!("public class Main {{ public static void main(String[] a) {{ System.out.println({}); }} }}", n)
    };
    let (a, b, c) = (program(1), program(2), program(3));
    let (ra, rb, rc) = tokio::join!(
        exec.execute("Java", &a),
        exec.execute("Java", &b),
        exec.execute("Java", &c)
    );
    assert_eq!(ra?.stdout_text().trim(), "1");
    assert_eq!(rb?.stdout_text().trim(), "2");
    assert_eq!(rc?.stdout_text().trim(), "3");
    Ok(())
}

#[tokio::test]
async fn missing_interpreter_is_reported_as_text() -> Result<()> {
    let cfg = Config::with_values([("NODE_BIN", "node-binary-that-does-not-exist")]);
    let exec = Executor::new(Registry::from_config(&cfg));
    let result = exec.execute("JavaScript", "console.log(1)").await?;
    assert!(result.stdout.is_none());
    assert_eq!(result.status, ExecutionStatus::ToolchainFailed);
    assert!(result.stderr_text().contains("node-binary-that-does-not-exist"));
    Ok(())
}

#[tokio::test]
async fn runaway_program_is_stopped_by_timeout() -> Result<()> {
    if !has_tool("python3", "--version") {
        return Ok(());
    }
    let cfg = Config::with_values([("EXECUTION_TIMEOUT", "1")]);
    let exec = Executor::new(Registry::from_config(&cfg));
    let result = exec.execute("Python", "while True:\n    pass\n").await?;
    assert_eq!(result.status, ExecutionStatus::TimedOut);
    assert!(result.stdout.is_none());
    assert_eq!(result.stderr_text(), "Execution timed out after 1s");
    Ok(())
}

#[tokio::test]
async fn timed_out_program_is_killed() -> Result<()> {
    if !has_tool("python3", "--version") {
        return Ok(());
    }
    let dir = tempfile::tempdir()?;
    let marker = dir.path().join("marker");
    let code = format!(
        "import time\ntime.sleep(3)\nopen({:?}, 'w').write('late')\n",
        marker.to_string_lossy()
    );
    let cfg = Config::with_values([("EXECUTION_TIMEOUT", "1")]);
    let exec = Executor::new(Registry::from_config(&cfg));
    let result = exec.execute("Python", &code).await?;
    assert_eq!(result.status, ExecutionStatus::TimedOut);

    tokio::time::sleep(std::time::Duration::from_secs(4)).await;
    assert!(!marker.exists(), "process kept running after the timeout");
    Ok(())
}

#[tokio::test]
async fn unsupported_language_is_rejected() {
    let err = executor().execute("Ruby", "puts 1").await.unwrap_err();
    assert_eq!(err.to_string(), "unsupported language: Ruby");
}
