use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "code-tutor", about = "LLM-drafted programming lessons with local code execution", version)]
pub struct Cli {
    /// Large language model to use.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Render lessons and feedback as Markdown.
    #[arg(long, global = true, conflicts_with = "no_md")]
    pub md: bool,
    /// Print plain text instead of Markdown.
    #[arg(long = "no-md", global = true)]
    pub no_md: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List supported languages and their toolchains.
    Languages,

    /// Execute a source file (or stdin) with the language's toolchain.
    Run {
        /// Python, JavaScript, Java or C++.
        #[arg(short = 'l', long)]
        language: String,
        /// Source file; reads stdin when omitted.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Print the execution result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Draft a three-lesson learning path.
    Curriculum {
        #[command(flatten)]
        learner: LearnerArgs,
        /// Print the lessons as JSON instead of rendering them.
        #[arg(long)]
        json: bool,
    },

    /// Ask for feedback on a solution.
    Feedback {
        #[arg(short = 'l', long)]
        language: String,
        /// Lesson objective the code should meet.
        #[arg(long)]
        objective: String,
        /// Exercise question being answered.
        #[arg(long)]
        exercise: String,
        /// Source file; reads stdin when omitted.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Interactive tutoring session.
    Session {
        /// Skip the language question.
        #[arg(short = 'l', long)]
        language: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct LearnerArgs {
    #[arg(short = 'l', long)]
    pub language: String,
    /// What the learner already knows.
    #[arg(long)]
    pub knowledge: String,
    /// What the learner wants to achieve.
    #[arg(long)]
    pub goals: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
