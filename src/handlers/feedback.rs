use std::path::Path;

use anyhow::Result;

use super::Context;
use crate::utils::read_source;

pub async fn run(
    ctx: &Context,
    language: &str,
    objective: &str,
    exercise: &str,
    file: Option<&Path>,
) -> Result<()> {
    let profile = ctx.executor.registry().lookup(language)?;
    let code = read_source(file)?;
    let text = ctx
        .feedback
        .generate(profile.language, &code, objective, exercise)
        .await;
    ctx.printer.print(&text);
    Ok(())
}
