//! Interactive session: learner profile, generated lessons, then a run/feedback loop.

use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use super::Context;
use crate::{
    execution::{Language, LanguageProfile},
    printer::TerminalReporter,
    tutor::Lesson,
    utils::{edit_in_editor, prompt_line},
};

struct Session<'a> {
    ctx: &'a Context,
    profile: &'a LanguageProfile,
    lessons: Vec<Lesson>,
    /// Learner's latest code per lesson.
    drafts: Vec<Option<String>>,
    current: usize,
}

pub async fn run(ctx: &Context, language: Option<&str>) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("session requires an interactive terminal");
    }

    let profile = match language {
        Some(id) => ctx.executor.registry().lookup(id)?,
        None => match ask_language(ctx)? {
            Some(profile) => profile,
            None => return Ok(()),
        },
    };

    let Some(lessons) = draft_lessons(ctx, profile.language).await? else {
        return Ok(());
    };
    let mut session = Session::new(ctx, profile, lessons);
    session.show();

    loop {
        // End of input quits like 'q'.
        let Some(choice) = prompt_line(
            "[R]un example, [E]dit & run, [F]eedback, [N]ext, [P]revious, [G]enerate again, [Q]uit: ",
        )?
        else {
            println!();
            break;
        };
        let choice = choice.to_lowercase();

        match choice.as_str() {
            "r" => session.run_example().await,
            "e" => {
                if let Err(e) = session.edit_and_run().await {
                    eprintln!("{}", format!("{:#}", e).red());
                }
            }
            "f" => session.feedback().await,
            "n" => session.step(1),
            "p" => session.step(-1),
            "g" => {
                if let Some(lessons) = draft_lessons(ctx, profile.language).await? {
                    session = Session::new(ctx, profile, lessons);
                    session.show();
                }
            }
            "q" => break,
            "" => {}
            other => println!("Unknown choice '{}'", other),
        }
    }
    Ok(())
}

fn ask_language(ctx: &Context) -> Result<Option<&LanguageProfile>> {
    let names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
    loop {
        let Some(answer) = prompt_line(&format!("Language ({}): ", names.join(", ")))? else {
            return Ok(None);
        };
        match ctx.executor.registry().lookup(&answer) {
            Ok(profile) => return Ok(Some(profile)),
            Err(e) => eprintln!("{}", e.red()),
        }
    }
}

/// Ask for the learner's background and goal until lessons are produced.
/// `None` when the learner leaves both answers empty or input ends.
async fn draft_lessons(ctx: &Context, language: Language) -> Result<Option<Vec<Lesson>>> {
    loop {
        let Some(knowledge) = prompt_line("What do you already know? ")? else {
            return Ok(None);
        };
        let Some(goals) = prompt_line("What do you want to learn? ")? else {
            return Ok(None);
        };
        if knowledge.is_empty() && goals.is_empty() {
            return Ok(None);
        }
        if knowledge.is_empty() || goals.is_empty() {
            eprintln!("{}", "Please answer both questions.".red());
            continue;
        }
        println!("Generating your learning path...");
        if let Some(lessons) = ctx
            .curriculum
            .generate(&knowledge, &goals, language, &TerminalReporter)
            .await
        {
            return Ok(Some(lessons));
        }
    }
}

impl<'a> Session<'a> {
    fn new(ctx: &'a Context, profile: &'a LanguageProfile, lessons: Vec<Lesson>) -> Self {
        let drafts = vec![None; lessons.len()];
        Self { ctx, profile, lessons, drafts, current: 0 }
    }

    fn lesson(&self) -> &Lesson {
        &self.lessons[self.current]
    }

    fn show(&self) {
        self.ctx.printer.lesson(self.current + 1, self.lesson(), self.profile);
    }

    fn step(&mut self, delta: isize) {
        let next = self.current as isize + delta;
        if next < 0 || next >= self.lessons.len() as isize {
            println!("No more lessons in that direction.");
            return;
        }
        self.current = next as usize;
        self.show();
    }

    async fn run_example(&self) {
        let code = self.lesson().example_code.clone();
        let result = self.ctx.executor.execute_profile(self.profile, &code).await;
        self.ctx.printer.execution(&result);
    }

    async fn edit_and_run(&mut self) -> Result<()> {
        let seed = self.drafts[self.current]
            .clone()
            .unwrap_or_else(|| self.lesson().example_code.clone());
        let code = edit_in_editor(&seed, self.profile.file_suffix)?;
        self.drafts[self.current] = Some(code.clone());

        let result = self.ctx.executor.execute_profile(self.profile, &code).await;
        self.ctx.printer.execution(&result);
        Ok(())
    }

    async fn feedback(&self) {
        let code = self.drafts[self.current].as_deref().unwrap_or("");
        let lesson = self.lesson();
        println!("Requesting feedback...");
        let text = self
            .ctx
            .feedback
            .generate(self.profile.language, code, &lesson.objective, &lesson.coding_exercise)
            .await;
        self.ctx.printer.print(&text);
    }
}
