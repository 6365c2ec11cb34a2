//! Code critique against a lesson's objective and exercise.

use std::sync::Arc;

use super::GenerationSettings;
use crate::{execution::Language, llm::TextGenerator, role::TutorRole};

pub const NO_CODE_MESSAGE: &str =
    "No code submitted for feedback. Please write some code before requesting feedback.";

pub struct FeedbackGenerator {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl FeedbackGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self { generator, settings }
    }

    /// Always returns display text; service failures are folded into it.
    pub async fn generate(
        &self,
        language: Language,
        code: &str,
        objective: &str,
        exercise_question: &str,
    ) -> String {
        if code.is_empty() {
            return NO_CODE_MESSAGE.to_string();
        }

        let prompt = build_prompt(language, code, objective, exercise_question);
        let request = self.settings.request(TutorRole::Feedback, prompt);
        match self.generator.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%language, error = %e, "feedback generation failed");
                format!("Feedback generation error: {}", e)
            }
        }
    }
}

pub fn build_prompt(language: Language, code: &str, objective: &str, exercise_question: &str) -> String {
    format!(
        "Analyze this {language} code submission:
Lesson Objective: {objective}
Exercise Question: {exercise_question}

Code:
```
{code}
```

Provide:
1. Code correctness assessment
2. Best practices feedback
3. Improvement suggestions"
    )
}
