//! Single-step runners: write the source to a temp file and hand it to an interpreter.

use std::{io::Write, time::Duration};

use async_trait::async_trait;

use super::{limit_label, ExecutionResult, Runner};
use crate::{
    error::TutorResult,
    process::{run_captured, CommandTemplate, Placeholders},
};

#[derive(Debug, Clone)]
pub struct InterpretedRunner {
    command: CommandTemplate,
    suffix: String,
    limit: Option<Duration>,
}

impl InterpretedRunner {
    /// `interpreter {{src}}`
    pub fn new(interpreter: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            command: CommandTemplate::new(interpreter, ["{{src}}"]),
            suffix: suffix.into(),
            limit: None,
        }
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.limit = limit;
        self
    }

    async fn run(&self, source: &str) -> TutorResult<ExecutionResult> {
        // Removed when `file` drops, on every return path.
        let mut file = tempfile::Builder::new()
            .prefix("tutor-")
            .suffix(&self.suffix)
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;

        let path = file.path();
        let dir = path.parent().unwrap_or(path);
        let ph = Placeholders { src: path, dir, out: path };
        let out = run_captured(&self.command, &ph, self.limit).await?;
        Ok(ExecutionResult::finished(out.stdout, out.stderr, out.status.code(), out.status.success()))
    }
}

#[async_trait]
impl Runner for InterpretedRunner {
    async fn execute(&self, source: &str) -> ExecutionResult {
        self.run(source)
            .await
            .unwrap_or_else(|e| ExecutionResult::from_error(&e))
    }

    fn describe(&self) -> String {
        format!("{} (timeout: {})", self.command.program, limit_label(self.limit))
    }
}
