//! LLM-backed tutoring: curriculum drafting and code critique.

use serde::{Deserialize, Serialize};

use crate::{config::Config, llm::CompletionRequest, role::{role_text, TutorRole}};

pub mod curriculum;
pub mod feedback;

pub use curriculum::{CurriculumGenerator, Reporter, LESSON_COUNT};
pub use feedback::{FeedbackGenerator, NO_CODE_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub objective: String,
    pub explanation: String,
    pub example_code: String,
    pub coding_exercise: String,
}

/// Model and token bound shared by both generators.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl GenerationSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.get("DEFAULT_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            max_tokens: cfg.get_u32("MAX_TOKENS").unwrap_or(1000),
        }
    }

    pub(crate) fn request(&self, role: TutorRole, prompt: String) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            system: role_text(role).to_string(),
            prompt,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { model: "gpt-4".into(), max_tokens: 1000 }
    }
}
