//! `curriculum`: draft lessons once and print them.

use anyhow::{bail, Result};

use super::Context;
use crate::{cli::LearnerArgs, printer::TerminalReporter};

pub async fn run(ctx: &Context, learner: &LearnerArgs, json: bool) -> Result<()> {
    let profile = ctx.executor.registry().lookup(&learner.language)?;
    let Some(lessons) = ctx
        .curriculum
        .generate(&learner.knowledge, &learner.goals, profile.language, &TerminalReporter)
        .await
    else {
        bail!("no lessons generated");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "lessons": lessons }))?);
        return Ok(());
    }
    for (i, lesson) in lessons.iter().enumerate() {
        ctx.printer.lesson(i + 1, lesson, profile);
    }
    Ok(())
}
