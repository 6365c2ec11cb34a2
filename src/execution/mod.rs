//! Execution engine: runner protocol, result types and the dispatching service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{TutorError, TutorResult};

pub mod compiled;
pub mod interpreted;
pub mod registry;

pub use compiled::CompiledRunner;
pub use interpreted::InterpretedRunner;
pub use registry::{Language, LanguageProfile, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Succeeded,
    CompileFailed,
    RuntimeFailed,
    ToolchainFailed,
    TimedOut,
}

/// Captured output of one execution request.
///
/// `stdout` is `None` when nothing was run to completion (toolchain missing,
/// compilation failed, timeout); `stderr` then carries the reason.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub status: ExecutionStatus,
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    pub(crate) fn finished(stdout: String, stderr: String, code: Option<i32>, ok: bool) -> Self {
        Self {
            stdout: Some(stdout),
            stderr: Some(stderr),
            status: if ok { ExecutionStatus::Succeeded } else { ExecutionStatus::RuntimeFailed },
            exit_code: code,
        }
    }

    pub(crate) fn compile_failed(diagnostics: String, code: Option<i32>) -> Self {
        Self {
            stdout: None,
            stderr: Some(diagnostics),
            status: ExecutionStatus::CompileFailed,
            exit_code: code,
        }
    }

    /// Orchestration failure: the error message replaces the output.
    pub(crate) fn from_error(err: &TutorError) -> Self {
        let status = match err {
            TutorError::Timeout(_) => ExecutionStatus::TimedOut,
            // Scratch files that cannot be written are as fatal as a missing compiler.
            _ => ExecutionStatus::ToolchainFailed,
        };
        Self { stdout: None, stderr: Some(err.to_string()), status, exit_code: None }
    }

    pub fn succeeded(&self) -> bool {
        self.status == ExecutionStatus::Succeeded
    }

    pub fn stdout_text(&self) -> &str {
        self.stdout.as_deref().unwrap_or("")
    }

    pub fn stderr_text(&self) -> &str {
        self.stderr.as_deref().unwrap_or("")
    }
}

/// One execution strategy. Runners never fail outward: every problem ends up
/// as text in the result.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn execute(&self, source: &str) -> ExecutionResult;

    /// Human-readable toolchain summary, e.g. `javac + java`.
    fn describe(&self) -> String;
}

/// Dispatches execution requests to the runner registered for a language.
pub struct Executor {
    registry: Registry,
}

impl Executor {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run `source` with the toolchain registered for `identifier`.
    pub async fn execute(&self, identifier: &str, source: &str) -> TutorResult<ExecutionResult> {
        let profile = self.registry.lookup(identifier)?;
        Ok(self.execute_profile(profile, source).await)
    }

    pub async fn execute_profile(&self, profile: &LanguageProfile, source: &str) -> ExecutionResult {
        tracing::info!(language = %profile.language, bytes = source.len(), "executing code");
        let result = profile.runner.execute(source).await;
        if !result.succeeded() {
            tracing::info!(language = %profile.language, status = ?result.status, "execution did not succeed");
        }
        result
    }
}

pub(crate) fn limit_label(limit: Option<Duration>) -> String {
    match limit {
        Some(d) => format!("{}s", d.as_secs()),
        None => "unbounded".to_string(),
    }
}
