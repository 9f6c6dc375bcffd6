//! Interactive console fallback used when no BOM path is given.

use std::io::{self, BufRead, Write};

/// Print `message`, read one line and return it trimmed. Empty answers and
/// end-of-input both yield `None`.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

pub fn ask_identifier<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    ask(input, output, "Enter the LCSC part number to download: ")
}

pub fn ask_bom_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    ask(input, output, "Enter the path to the BOM file (CSV or Excel): ")
}
