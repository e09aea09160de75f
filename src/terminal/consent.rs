//! Interactive consent step run before the terminal is taken over

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::common::constants::terminal::CONSENT_PHRASE;

/// Explain what will be recorded and ask for the exact consent phrase.
///
/// Only the trailing line terminator is stripped; any other difference,
/// including EOF, counts as a refusal.
pub fn prompt_consent(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    writeln!(
        output,
        "This program records every key typed into this terminal to a session log file."
    )?;
    writeln!(output, "Keys typed into other windows are never captured.")?;
    write!(output, "Type '{CONSENT_PHRASE}' to continue: ")?;
    output.flush().context("Failed to flush consent prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read consent answer")?;
    if read == 0 {
        return Ok(false);
    }

    let answer = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    Ok(answer == CONSENT_PHRASE)
}
