//! Command-line surface: argument normalization and interactive prompts.

mod args;
mod prompt;

pub use args::{Cli, Field, Options};
pub use prompt::{LinePrompter, PromptError, Prompter};
