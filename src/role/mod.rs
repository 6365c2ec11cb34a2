//! System roles sent alongside every tutor prompt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorRole {
    Curriculum,
    Feedback,
}

pub fn role_text(role: TutorRole) -> &'static str {
    match role {
        TutorRole::Curriculum => {
            "You are a helpful assistant that help people learn programming languages."
        }
        TutorRole::Feedback => "You are a helpful assistant that check code and provide feedback.",
    }
}
