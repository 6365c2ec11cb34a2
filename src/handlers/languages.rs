use owo_colors::OwoColorize;

use super::Context;

pub fn run(ctx: &Context) {
    for profile in ctx.executor.registry().profiles() {
        println!(
            "{:<12} mode={:<11} suffix={:<6} {}",
            profile.language.green(),
            profile.editor_mode,
            profile.file_suffix,
            profile.runner.describe()
        );
    }
}
