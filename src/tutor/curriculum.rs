//! Curriculum generation: prompt the model for three lessons and parse its JSON reply.

use std::sync::Arc;

use serde::Deserialize;

use super::{GenerationSettings, Lesson};
use crate::{
    error::{TutorError, TutorResult},
    execution::Language,
    llm::TextGenerator,
    role::TutorRole,
};

pub const LESSON_COUNT: usize = 3;

/// Where user-facing failure messages go.
pub trait Reporter {
    fn error(&self, message: &str);
}

#[derive(Debug, Deserialize)]
struct CurriculumReply {
    lessons: Vec<Lesson>,
}

pub struct CurriculumGenerator {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl CurriculumGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self { generator, settings }
    }

    /// Draft a learning path. On any failure the reporter receives one message
    /// and no lessons are returned.
    pub async fn generate(
        &self,
        current_knowledge: &str,
        learning_goals: &str,
        language: Language,
        reporter: &dyn Reporter,
    ) -> Option<Vec<Lesson>> {
        match self.try_generate(current_knowledge, learning_goals, language).await {
            Ok(lessons) => Some(lessons),
            Err(e) => {
                tracing::warn!(%language, error = %e, "curriculum generation failed");
                reporter.error(&format!("Error generating learning path: {}\nPlease try again.", e));
                None
            }
        }
    }

    pub async fn try_generate(
        &self,
        current_knowledge: &str,
        learning_goals: &str,
        language: Language,
    ) -> TutorResult<Vec<Lesson>> {
        let prompt = build_prompt(current_knowledge, learning_goals, language);
        let request = self.settings.request(TutorRole::Curriculum, prompt);
        let reply = self.generator.complete(&request).await?;
        let lessons = parse_lessons(&reply)?;
        tracing::info!(%language, lessons = lessons.len(), "curriculum generated");
        Ok(lessons)
    }
}

pub fn build_prompt(current_knowledge: &str, learning_goals: &str, language: Language) -> String {
    format!(
        "Create a learning path for a learner with the following details:
- Language: {language}
- Current Knowledge: {current_knowledge}
- Learning Goals: {learning_goals}
(If language is Java or C++, please provide main method in the example code. For Java, the public class must be named Main. Note: double quotes are escaped in Java and C++ strings.)
Provide a JSON response list of {LESSON_COUNT} programming lessons and their key is 'lessons', including:
- title
- objective
- explanation
- example_code
- coding_exercise

(Note: do not include lesson number in the title, it will be added by the system.)
(Note: explanation should be helpful and provide details, and exercise will be related to it.)
(Note: there is no need to provide background or installation lessons, all {LESSON_COUNT} lessons are related to coding.)
(Note: respond with the JSON object only.)"
    )
}

/// Parse and validate a curriculum reply. Accepts a bare JSON object or one
/// wrapped in a Markdown code fence.
pub fn parse_lessons(raw: &str) -> TutorResult<Vec<Lesson>> {
    let reply: CurriculumReply = serde_json::from_str(strip_code_fence(raw))?;
    if reply.lessons.len() != LESSON_COUNT {
        return Err(TutorError::Service(format!(
            "expected {} lessons, got {}",
            LESSON_COUNT,
            reply.lessons.len()
        )));
    }
    for (i, lesson) in reply.lessons.iter().enumerate() {
        let fields = [
            ("title", &lesson.title),
            ("objective", &lesson.objective),
            ("explanation", &lesson.explanation),
            ("example_code", &lesson.example_code),
            ("coding_exercise", &lesson.coding_exercise),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(TutorError::Service(format!("lesson {} has an empty {}", i + 1, name)));
        }
    }
    Ok(reply.lessons)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. `json`) up to the first newline
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
