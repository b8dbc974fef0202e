//! Confirmation prompt for destructive actions

use std::io::{self, BufRead, Write};

/// Ask a yes/no question; anything but an explicit yes declines
pub fn confirm<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
