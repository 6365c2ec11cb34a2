//! Supported languages and the runner registered for each.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use serde::Serialize;

use super::{CompiledRunner, InterpretedRunner, Runner};
use crate::{
    config::Config,
    error::{TutorError, TutorResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    #[serde(rename = "C++")]
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Python, Language::JavaScript, Language::Java, Language::Cpp];

    pub fn name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Language {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Language::Python),
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "c++" | "cpp" | "cxx" => Ok(Language::Cpp),
            _ => Err(TutorError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct LanguageProfile {
    pub language: Language,
    /// Syntax mode name for code editors (ace mode names).
    pub editor_mode: &'static str,
    /// Canonical source suffix, dot included.
    pub file_suffix: &'static str,
    pub runner: Arc<dyn Runner>,
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("language", &self.language)
            .field("editor_mode", &self.editor_mode)
            .field("file_suffix", &self.file_suffix)
            .field("runner", &self.runner.describe())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    profiles: HashMap<Language, LanguageProfile>,
}

impl Registry {
    /// Toolchain binaries and the execution timeout come from config.
    pub fn from_config(cfg: &Config) -> Self {
        let limit = cfg.execution_timeout();
        let python = InterpretedRunner::new(cfg.program("PYTHON_BIN", "python3"), ".py").with_timeout(limit);
        let node = InterpretedRunner::new(cfg.program("NODE_BIN", "node"), ".js").with_timeout(limit);
        let java = CompiledRunner::java(&cfg.program("JAVAC_BIN", "javac"), &cfg.program("JAVA_BIN", "java"))
            .with_timeout(limit);
        let cpp = CompiledRunner::cpp(&cfg.program("CXX_BIN", "g++")).with_timeout(limit);

        let mut registry = Self { profiles: HashMap::new() };
        registry.insert(Language::Python, "python", ".py", Arc::new(python));
        registry.insert(Language::JavaScript, "javascript", ".js", Arc::new(node));
        registry.insert(Language::Java, "java", ".java", Arc::new(java));
        registry.insert(Language::Cpp, "c_cpp", ".cpp", Arc::new(cpp));
        registry
    }

    fn insert(
        &mut self,
        language: Language,
        editor_mode: &'static str,
        file_suffix: &'static str,
        runner: Arc<dyn Runner>,
    ) {
        self.profiles.insert(
            language,
            LanguageProfile { language, editor_mode, file_suffix, runner },
        );
    }

    pub fn lookup(&self, identifier: &str) -> TutorResult<&LanguageProfile> {
        let language: Language = identifier.parse()?;
        self.get(language)
    }

    pub fn get(&self, language: Language) -> TutorResult<&LanguageProfile> {
        self.profiles
            .get(&language)
            .ok_or_else(|| TutorError::UnsupportedLanguage(language.to_string()))
    }

    /// Profiles in a stable display order.
    pub fn profiles(&self) -> Vec<&LanguageProfile> {
        Language::ALL.iter().filter_map(|l| self.profiles.get(l)).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(&Config::with_values(Vec::<(String, String)>::new()))
    }
}
