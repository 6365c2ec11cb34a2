use anyhow::Result;
use tracing_subscriber::EnvFilter;

use code_tutor::{
    cli::{Cli, Command},
    config::Config,
    handlers::{self, Context},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so program output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = Config::load();
    let markdown = if args.no_md {
        false
    } else if args.md {
        true
    } else {
        cfg.get_bool("PRETTIFY_MARKDOWN")
    };
    let ctx = Context::from_config(&cfg, args.model.clone(), markdown)?;

    match &args.command {
        Command::Languages => {
            handlers::languages::run(&ctx);
            Ok(())
        }
        Command::Run { language, file, json } => {
            handlers::run::run(&ctx, language, file.as_deref(), *json).await
        }
        Command::Curriculum { learner, json } => handlers::curriculum::run(&ctx, learner, *json).await,
        Command::Feedback { language, objective, exercise, file } => {
            handlers::feedback::run(&ctx, language, objective, exercise, file.as_deref()).await
        }
        Command::Session { language } => handlers::session::run(&ctx, language.as_deref()).await,
    }
}
