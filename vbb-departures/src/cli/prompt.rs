//! Interactive prompts.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

/// Errors while asking the user for input.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input ended before an answer was given
    #[error("prompt cancelled")]
    Cancelled,

    /// Reading or writing the terminal failed
    #[error("prompt I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Something that can ask the user a question.
pub trait Prompter {
    /// Ask `question` and return the trimmed answer.
    ///
    /// An empty answer yields `default` when one is given.
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String, PromptError>;
}

/// Line-based prompter: writes the question, reads one line.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning its output (for inspection in tests).
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<StdinLock<'static>, Stderr> {
    /// Prompt on the terminal. Questions go to stderr so stdout carries only
    /// the departure table.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String, PromptError> {
        match default {
            Some(default) => write!(self.output, "{question} [{default}] ")?,
            None => write!(self.output, "{question} ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PromptError::Cancelled);
        }

        let answer = line.trim();
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer.to_string()),
        }
    }
}
