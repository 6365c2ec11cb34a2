//! Two-step runners: compile inside a scratch directory, then run the artifact.

use std::{fs, time::Duration};

use async_trait::async_trait;

use super::{limit_label, ExecutionResult, Runner};
use crate::{
    error::TutorResult,
    process::{run_captured, CommandTemplate, Placeholders},
};

#[derive(Debug, Clone)]
pub struct CompiledRunner {
    /// File name the source is saved under, e.g. `Main.java`.
    entry_file: String,
    /// Artifact name inside the scratch directory (`{{out}}`).
    artifact: String,
    compile: CommandTemplate,
    run: CommandTemplate,
    limit: Option<Duration>,
}

impl CompiledRunner {
    pub fn new(
        entry_file: impl Into<String>,
        artifact: impl Into<String>,
        compile: CommandTemplate,
        run: CommandTemplate,
    ) -> Self {
        Self {
            entry_file: entry_file.into(),
            artifact: artifact.into(),
            compile,
            run,
            limit: None,
        }
    }

    /// `javac {{src}}` then `java -cp {{dir}} Main`.
    pub fn java(javac: &str, java: &str) -> Self {
        Self::new(
            "Main.java",
            "Main",
            CommandTemplate::new(javac, ["{{src}}"]),
            CommandTemplate::new(java, ["-cp", "{{dir}}", "Main"]),
        )
    }

    /// `g++ {{src}} -o {{out}}` then `{{out}}`.
    pub fn cpp(cxx: &str) -> Self {
        let artifact = if cfg!(windows) { "main.exe" } else { "main" };
        Self::new(
            "main.cpp",
            artifact,
            CommandTemplate::new(cxx, ["{{src}}", "-o", "{{out}}"]),
            CommandTemplate::new("{{out}}", Vec::<String>::new()),
        )
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.limit = limit;
        self
    }

    async fn build_and_run(&self, source: &str) -> TutorResult<ExecutionResult> {
        // A fresh directory per call keeps the fixed entry file name collision-free.
        let scratch = tempfile::Builder::new().prefix("tutor-build-").tempdir()?;
        let src = scratch.path().join(&self.entry_file);
        let out = scratch.path().join(&self.artifact);
        fs::write(&src, source)?;

        let ph = Placeholders { src: &src, dir: scratch.path(), out: &out };
        let compiled = run_captured(&self.compile, &ph, self.limit).await?;
        if !compiled.success() {
            tracing::debug!(entry = %self.entry_file, code = ?compiled.status.code(), "compilation failed");
            return Ok(ExecutionResult::compile_failed(compiled.stderr, compiled.status.code()));
        }

        let ran = run_captured(&self.run, &ph, self.limit).await?;
        Ok(ExecutionResult::finished(ran.stdout, ran.stderr, ran.status.code(), ran.status.success()))
    }
}

#[async_trait]
impl Runner for CompiledRunner {
    async fn execute(&self, source: &str) -> ExecutionResult {
        self.build_and_run(source)
            .await
            .unwrap_or_else(|e| ExecutionResult::from_error(&e))
    }

    fn describe(&self) -> String {
        format!(
            "{} + {} (timeout: {})",
            self.compile.program,
            if self.run.program == "{{out}}" { self.artifact.as_str() } else { self.run.program.as_str() },
            limit_label(self.limit)
        )
    }
}
