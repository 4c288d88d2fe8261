//! Test doubles for the process seam.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::SyncError;
use crate::exec::{CommandOutput, CommandRunner, Invocation};

/// Records every invocation and replays scripted outputs in order.
///
/// Once the script runs out, every call succeeds with no output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    script: RefCell<VecDeque<CommandOutput>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next unanswered call.
    pub fn respond_with(&self, output: CommandOutput) {
        self.script.borrow_mut().push_back(output);
    }

    /// Queue a successful captured call printing `text`.
    pub fn respond_text(&self, text: impl Into<String>) {
        self.respond_with(CommandOutput {
            exit_code: Some(0),
            output: Some(text.into()),
        });
    }

    /// Queue a call exiting with `code`.
    pub fn respond_exit(&self, code: i32) {
        self.respond_with(CommandOutput {
            exit_code: Some(code),
            output: None,
        });
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Calls whose argument list contains `needle`.
    pub fn calls_with_arg(&self, needle: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.arg_strings().iter().any(|a| a == needle))
            .cloned()
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, SyncError> {
        self.calls.borrow_mut().push(invocation.clone());
        let scripted = self.script.borrow_mut().pop_front();
        Ok(scripted.unwrap_or_else(|| CommandOutput {
            exit_code: Some(0),
            output: invocation.capture.then(String::new),
        }))
    }
}
