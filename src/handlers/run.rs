//! `run`: execute a file with the selected language's toolchain.

use std::path::Path;

use anyhow::{bail, Result};

use super::Context;
use crate::utils::read_source;

pub async fn run(ctx: &Context, language: &str, file: Option<&Path>, json: bool) -> Result<()> {
    let profile = ctx.executor.registry().lookup(language)?;
    let source = read_source(file)?;
    let result = ctx.executor.execute_profile(profile, &source).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    ctx.printer.execution(&result);
    if !result.succeeded() {
        bail!("{} run finished with status {:?}", profile.language, result.status);
    }
    Ok(())
}
