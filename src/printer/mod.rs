//! Printers: lessons, execution results and feedback, as text or markdown (termimad).

use owo_colors::OwoColorize;
use termimad::MadSkin;

use crate::{
    execution::{ExecutionResult, ExecutionStatus, LanguageProfile},
    tutor::{Lesson, Reporter},
};

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }
}

/// Prints either through termimad or verbatim.
pub struct Printer {
    markdown: Option<MarkdownPrinter>,
}

impl Printer {
    pub fn new(markdown: bool) -> Self {
        Self { markdown: markdown.then(MarkdownPrinter::default) }
    }

    pub fn print(&self, text: &str) {
        match &self.markdown {
            Some(md) => md.print(text),
            None => println!("{}", text),
        }
    }

    pub fn lesson(&self, ordinal: usize, lesson: &Lesson, profile: &LanguageProfile) {
        self.print(&render_lesson(ordinal, lesson, profile));
    }

    pub fn execution(&self, result: &ExecutionResult) {
        print_execution(result);
    }
}

/// Lesson as markdown; ordinals are 1-based.
pub fn render_lesson(ordinal: usize, lesson: &Lesson, profile: &LanguageProfile) -> String {
    format!(
        "# Lesson {}: {}\n\n**Objective:** {}\n\n## Explanation\n\n{}\n\n## Example\n\n```{}\n{}\n```\n\n## Exercise\n\n{}\n",
        ordinal,
        lesson.title,
        lesson.objective,
        lesson.explanation,
        profile.editor_mode,
        lesson.example_code.trim_end(),
        lesson.coding_exercise
    )
}

pub fn print_execution(result: &ExecutionResult) {
    let stdout = result.stdout_text();
    if !stdout.is_empty() {
        print!("{}", stdout);
        if !stdout.ends_with('\n') {
            println!();
        }
    }
    let stderr = result.stderr_text().trim_end();
    if stderr.is_empty() {
        return;
    }
    match result.status {
        // stderr from a clean exit is shown as warnings
        ExecutionStatus::Succeeded => eprintln!("{}", stderr.yellow()),
        _ => eprintln!("{}", stderr.red()),
    }
}

/// Reports generator failures on stderr.
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn error(&self, message: &str) {
        for line in message.lines() {
            eprintln!("{}", line.red());
        }
    }
}
