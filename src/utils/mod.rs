//! Utilities: reading source input and editing code in the learner's editor.

use std::{
    fs,
    io::{self, BufRead, Read, Write},
    path::Path,
    process::Command,
};

use anyhow::{anyhow, bail, Context, Result};
use is_terminal::IsTerminal;

/// Read source from `file`, or from piped stdin when no file is given.
pub fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            if !path.is_file() {
                bail!("'{}' is not a file", path.display());
            }
            fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
        }
        None => {
            if io::stdin().is_terminal() {
                bail!("provide a source file or pipe the code via stdin");
            }
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// `$VISUAL`, then `$EDITOR`, then a platform default.
pub fn editor_command() -> String {
    std::env::var("VISUAL")
        .ok()
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| if cfg!(windows) { "notepad".into() } else { "vi".into() })
}

/// Open `initial` in the learner's editor and return the saved text.
/// The scratch file carries `suffix` so the editor picks the right syntax mode.
pub fn edit_in_editor(initial: &str, suffix: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("tutor-edit-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    let editor = editor_command();
    // Editors are often configured with flags, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| anyhow!("empty editor command"))?;
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;
    if !status.success() {
        bail!("editor '{}' exited with {}", editor, status);
    }
    Ok(fs::read_to_string(file.path())?)
}

/// Print `label` and read one trimmed line from stdin. `None` at end of input.
pub fn prompt_line(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush().ok();
    read_answer(&mut io::stdin().lock())
}

fn read_answer(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
