use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    read_env: bool,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        // .tutorrc, then a .env in the working directory
        read_key_values(&default_config_path(), &mut map);
        read_key_values(Path::new(".env"), &mut map);

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, read_env: true }
    }

    /// Build a config from defaults plus explicit values, ignoring the
    /// process environment and any rc files.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = default_map();
        for (k, v) in values {
            map.insert(k.into(), v.into());
        }
        Self { inner: map, read_env: false }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if self.read_env {
            if let Ok(v) = env::var(key) {
                return Some(v);
            }
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse::<u32>().ok())
    }

    /// `None` means child processes run unbounded.
    pub fn execution_timeout(&self) -> Option<Duration> {
        match self.get_u64("EXECUTION_TIMEOUT") {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("REQUEST_TIMEOUT").unwrap_or(60))
    }

    pub fn program(&self, key: &str, fallback: &str) -> String {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn read_key_values(path: &Path, map: &mut HashMap<String, String>) {
    if !path.exists() {
        return;
    }
    if let Ok(file) = fs::File::open(path) {
        let reader = BufReader::new(file);
        for line in reader.lines().map_while(Result::ok) {
            if let Some((k, v)) = parse_line(&line) {
                map.insert(k, v);
            }
        }
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (k, v) = line.split_once('=')?;
    let v = v.trim();
    let v = v
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(v);
    Some((k.trim().to_string(), v.to_string()))
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "OPENAI_API_KEY",
        "API_BASE_URL",
        "DEFAULT_MODEL",
        "MAX_TOKENS",
        "REQUEST_TIMEOUT",
        "EXECUTION_TIMEOUT",
        "PYTHON_BIN",
        "NODE_BIN",
        "JAVAC_BIN",
        "JAVA_BIN",
        "CXX_BIN",
        "PRETTIFY_MARKDOWN",
    ];

    KEYS.contains(&k) || k.starts_with("TUTOR_") || k.starts_with("OPENAI_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("code_tutor").join(".tutorrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Numbers
    m.insert("MAX_TOKENS".into(), "1000".into());
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("EXECUTION_TIMEOUT".into(), "0".into());

    // Strings
    m.insert("DEFAULT_MODEL".into(), "gpt-4".into());
    m.insert("API_BASE_URL".into(), "default".into());

    // Toolchains
    m.insert("PYTHON_BIN".into(), "python3".into());
    m.insert("NODE_BIN".into(), "node".into());
    m.insert("JAVAC_BIN".into(), "javac".into());
    m.insert("JAVA_BIN".into(), "java".into());
    m.insert("CXX_BIN".into(), "g++".into());

    // Bools as strings
    m.insert("PRETTIFY_MARKDOWN".into(), "true".into());

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rc_lines() {
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(
            parse_line("OPENAI_API_KEY = sk-123"),
            Some(("OPENAI_API_KEY".into(), "sk-123".into()))
        );
        assert_eq!(
            parse_line("export DEFAULT_MODEL=\"gpt-4o\""),
            Some(("DEFAULT_MODEL".into(), "gpt-4o".into()))
        );
        assert_eq!(parse_line("CXX_BIN='clang++'"), Some(("CXX_BIN".into(), "clang++".into())));
        assert_eq!(parse_line("no separator"), None);
    }

    #[test]
    fn reads_rc_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tutorrc");
        fs::write(&path, "MAX_TOKENS=2000\n# ignored\nNODE_BIN=/opt/node/bin/node\n").unwrap();

        let mut map = default_map();
        read_key_values(&path, &mut map);
        assert_eq!(map.get("MAX_TOKENS").map(String::as_str), Some("2000"));
        assert_eq!(map.get("NODE_BIN").map(String::as_str), Some("/opt/node/bin/node"));
        assert_eq!(map.get("PYTHON_BIN").map(String::as_str), Some("python3"));
    }

    #[test]
    fn defaults_and_overrides() {
        let cfg = Config::with_values([("EXECUTION_TIMEOUT", "5"), ("JAVA_BIN", "  ")]);
        assert_eq!(cfg.get("DEFAULT_MODEL").as_deref(), Some("gpt-4"));
        assert_eq!(cfg.get_u32("MAX_TOKENS"), Some(1000));
        assert_eq!(cfg.execution_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.program("JAVA_BIN", "java"), "java");
        assert!(cfg.get_bool("PRETTIFY_MARKDOWN"));

        let unbounded = Config::with_values(Vec::<(String, String)>::new());
        assert_eq!(unbounded.execution_timeout(), None);
        assert_eq!(unbounded.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn recognises_config_keys() {
        assert!(is_config_key("OPENAI_API_KEY"));
        assert!(is_config_key("TUTOR_ANYTHING"));
        assert!(is_config_key("CXX_BIN"));
        assert!(!is_config_key("HOME"));
    }
}
