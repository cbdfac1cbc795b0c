//! Overwrite confirmation

use dialoguer::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

/// Ask whether an existing output file may be replaced.
///
/// Uses an interactive prompt on a terminal and falls back to reading a
/// single answer line from stdin otherwise. Anything but an explicit yes
/// declines.
pub fn confirm_overwrite(path: &Path) -> anyhow::Result<bool> {
    let question = format!("File '{}' already exists. Overwrite?", path.display());

    if io::stdin().is_terminal() {
        return Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Ok(read_confirmation(&question, &mut stdin.lock(), &mut stdout)?)
}

/// Write `question` and read a yes/no answer, defaulting to no.
pub fn read_confirmation<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
