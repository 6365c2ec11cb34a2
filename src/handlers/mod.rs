//! Command handlers wiring config, the execution service and the generators.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::Config,
    execution::{Executor, Registry},
    llm::{LlmClient, TextGenerator},
    printer::Printer,
    tutor::{CurriculumGenerator, FeedbackGenerator, GenerationSettings},
};

pub mod curriculum;
pub mod feedback;
pub mod languages;
pub mod run;
pub mod session;

/// Everything a handler needs, built once per process.
pub struct Context {
    pub executor: Executor,
    pub curriculum: CurriculumGenerator,
    pub feedback: FeedbackGenerator,
    pub printer: Printer,
}

impl Context {
    pub fn from_config(cfg: &Config, model: Option<String>, markdown: bool) -> Result<Self> {
        let client: Arc<dyn TextGenerator> = Arc::new(LlmClient::from_config(cfg)?);
        let mut settings = GenerationSettings::from_config(cfg);
        if let Some(m) = model {
            settings.model = m;
        }
        Ok(Self::new(Registry::from_config(cfg), client, settings, markdown))
    }

    pub fn new(
        registry: Registry,
        client: Arc<dyn TextGenerator>,
        settings: GenerationSettings,
        markdown: bool,
    ) -> Self {
        Self {
            executor: Executor::new(registry),
            curriculum: CurriculumGenerator::new(client.clone(), settings.clone()),
            feedback: FeedbackGenerator::new(client, settings),
            printer: Printer::new(markdown),
        }
    }
}
