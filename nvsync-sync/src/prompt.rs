//! Terminal seam for the confirmation loop.

use std::io::{self, BufRead, Write};

use nvsync_core::error::{io_err, InvalidUserInput};
use nvsync_core::SyncError;

/// Asks questions and shows text to the person running the sync.
pub trait Prompter {
    /// Show `question` and read one line. `None` means input is closed.
    fn ask(&mut self, question: &str) -> Result<Option<String>, SyncError>;

    /// Report input that matched no choice.
    fn reject(&mut self, invalid: &InvalidUserInput);

    /// Show text directly, used when no pager is configured.
    fn display(&mut self, text: &str) -> Result<(), SyncError>;
}

/// Questions on stdout, answers from stdin, rejections on stderr.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, question: &str) -> Result<Option<String>, SyncError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(question.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| io_err("<stdout>", e))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| io_err("<stdin>", e))?;
        Ok((read > 0).then_some(line))
    }

    fn reject(&mut self, invalid: &InvalidUserInput) {
        eprintln!("{invalid}");
    }

    fn display(&mut self, text: &str) -> Result<(), SyncError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| io_err("<stdout>", e))
    }
}
