use std::io::{BufRead, IsTerminal, Write};

use crate::cli::GlobalFlags;

/// Ask a yes/no question on stderr. `--yes` answers for the user; a
/// non-interactive stdin without `--yes` is refused.
pub fn confirm(question: &str, flags: &GlobalFlags) -> anyhow::Result<bool> {
    if flags.yes {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        anyhow::bail!("{question} needs confirmation; pass --yes when stdin is not a terminal");
    }
    ask(question, &mut stdin.lock(), &mut std::io::stderr())
}

pub fn ask<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    prompt: &mut W,
) -> anyhow::Result<bool> {
    write!(prompt, "{question} [y/N] ")?;
    prompt.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}
