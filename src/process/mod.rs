//! Child process invocation: command templates and captured output.

use std::{
    path::Path,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use tokio::{process::Command, time::timeout};

use crate::error::{TutorError, TutorResult};

/// Paths substituted into a [`CommandTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct Placeholders<'a> {
    /// Source file written for this run (`{{src}}`).
    pub src: &'a Path,
    /// Directory holding the source (`{{dir}}`).
    pub dir: &'a Path,
    /// Build artifact path for compiled languages (`{{out}}`).
    pub out: &'a Path,
}

/// A program plus argument templates, e.g. `g++ {{src}} -o {{out}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn render(&self, ph: &Placeholders<'_>) -> (String, Vec<String>) {
        let program = apply_template(&self.program, ph);
        let args = self.args.iter().map(|a| apply_template(a, ph)).collect();
        (program, args)
    }
}

fn apply_template(t: &str, ph: &Placeholders<'_>) -> String {
    t.replace("{{src}}", &ph.src.to_string_lossy())
        .replace("{{dir}}", &ph.dir.to_string_lossy())
        .replace("{{out}}", &ph.out.to_string_lossy())
}

/// Output of one finished child process.
#[derive(Debug, Clone)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Spawn `template` with the inherited environment and wait for it,
/// capturing both streams as text.
pub async fn run_captured(
    template: &CommandTemplate,
    ph: &Placeholders<'_>,
    limit: Option<Duration>,
) -> TutorResult<Captured> {
    let (program, args) = template.render(ph);
    tracing::debug!(program = %program, ?args, "spawning child process");

    let mut cmd = Command::new(&program);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| TutorError::Toolchain {
        program: program.clone(),
        reason: e.to_string(),
    })?;

    let out = match limit {
        Some(dur) => match timeout(dur, child.wait_with_output()).await {
            Ok(res) => res?,
            Err(_) => {
                // dropping the future kills the child
                tracing::warn!(program = %program, secs = dur.as_secs(), "child process timed out");
                return Err(TutorError::Timeout(dur));
            }
        },
        None => child.wait_with_output().await?,
    };

    tracing::debug!(program = %program, code = ?out.status.code(), "child process exited");
    Ok(Captured {
        stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        status: out.status,
    })
}
