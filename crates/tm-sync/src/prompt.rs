//! Yes/no confirmation

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

/// Ask the operator a yes/no question.
pub trait Confirm: Send {
    /// Return the answer, or `default_yes` when no explicit answer is given
    fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool>;
}

/// Non-interactive policy that always answers yes
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str, _default_yes: bool) -> io::Result<bool> {
        log::debug!("Assuming yes: {}", question);
        Ok(true)
    }
}

/// Line-based prompt over any reader/writer pair.
///
/// An empty line or end of input selects the default. `y`/`yes` and `n`/`no`
/// are accepted in any case; anything else asks again.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Prompt reading from `input` and writing the question to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<BufReader<Stdin>, Stderr> {
    /// Prompt on the process terminal; the question goes to stderr
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R, W> Confirm for PromptConfirm<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool> {
        let choices = if default_yes { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{} [{}] ", question, choices)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(default_yes);
            }
            if line.trim().is_empty() {
                return Ok(default_yes);
            }
            if let Some(answer) = parse_answer(&line) {
                return Ok(answer);
            }
            writeln!(self.output, "Please answer 'y' or 'n'.")?;
        }
    }
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
