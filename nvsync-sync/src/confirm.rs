//! Overwrite confirmation as a finite-state machine.
//!
//! ```text
//! Prompting --yes--> Accepted
//! Prompting --no---> Declined
//! Prompting --diff-> ViewingDiff --shown--> Prompting
//! ```
//!
//! Invalid and empty input leave the machine in `Prompting`.

use nvsync_core::error::InvalidUserInput;

/// Question shown for a differing pair.
pub fn question(source: &str, target: &str) -> String {
    format!("{source} differs from {target}. Overwrite? ([y]es/[n]o/view [d]iff) ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    ViewDiff,
}

impl Answer {
    /// Parse one line of user input.
    ///
    /// Matching is on the first character, case-insensitive; `view diff` is
    /// accepted in full. Blank input is `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, InvalidUserInput> {
        let choice = input.trim().to_lowercase();
        if choice.is_empty() {
            return Ok(None);
        }
        if choice == "view diff" {
            return Ok(Some(Answer::ViewDiff));
        }
        match choice.chars().next() {
            Some('y') => Ok(Some(Answer::Yes)),
            Some('n') => Ok(Some(Answer::No)),
            Some('d') => Ok(Some(Answer::ViewDiff)),
            _ => Err(InvalidUserInput(input.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Prompting,
    ViewingDiff,
    Accepted,
    Declined,
}

impl ConfirmState {
    pub fn on_answer(self, answer: Answer) -> Self {
        match (self, answer) {
            (ConfirmState::Prompting, Answer::Yes) => ConfirmState::Accepted,
            (ConfirmState::Prompting, Answer::No) => ConfirmState::Declined,
            (ConfirmState::Prompting, Answer::ViewDiff) => ConfirmState::ViewingDiff,
            (state, _) => state,
        }
    }

    pub fn on_diff_shown(self) -> Self {
        match self {
            ConfirmState::ViewingDiff => ConfirmState::Prompting,
            state => state,
        }
    }

    /// `Some(overwrite?)` once the machine has terminated.
    pub fn outcome(self) -> Option<bool> {
        match self {
            ConfirmState::Accepted => Some(true),
            ConfirmState::Declined => Some(false),
            ConfirmState::Prompting | ConfirmState::ViewingDiff => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("y", Answer::Yes)]
    #[case("Yes", Answer::Yes)]
    #[case("  YES \n", Answer::Yes)]
    #[case("n", Answer::No)]
    #[case("no", Answer::No)]
    #[case("d", Answer::ViewDiff)]
    #[case("diff", Answer::ViewDiff)]
    #[case("view diff", Answer::ViewDiff)]
    #[case("View Diff", Answer::ViewDiff)]
    fn accepted_answers(#[case] input: &str, #[case] expected: Answer) {
        assert_eq!(Answer::parse(input), Ok(Some(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n")]
    fn blank_input_is_ignored(#[case] input: &str) {
        assert_eq!(Answer::parse(input), Ok(None));
    }

    #[rstest]
    #[case("maybe")]
    #[case("q")]
    #[case("view")]
    #[case("1")]
    fn garbage_is_invalid(#[case] input: &str) {
        assert_eq!(
            Answer::parse(input),
            Err(InvalidUserInput(input.to_string()))
        );
    }

    #[test]
    fn diff_loops_back_to_prompting() {
        let state = ConfirmState::Prompting.on_answer(Answer::ViewDiff);
        assert_eq!(state, ConfirmState::ViewingDiff);
        assert_eq!(state.outcome(), None);
        let state = state.on_diff_shown();
        assert_eq!(state, ConfirmState::Prompting);
        assert_eq!(state.on_answer(Answer::Yes).outcome(), Some(true));
    }

    #[test]
    fn terminal_states_absorb_further_input() {
        let accepted = ConfirmState::Accepted;
        assert_eq!(accepted.on_answer(Answer::No), ConfirmState::Accepted);
        assert_eq!(accepted.on_diff_shown(), ConfirmState::Accepted);
        assert_eq!(
            ConfirmState::Declined.on_answer(Answer::Yes).outcome(),
            Some(false)
        );
    }

    #[test]
    fn diff_shown_outside_viewing_is_a_no_op() {
        assert_eq!(
            ConfirmState::Prompting.on_diff_shown(),
            ConfirmState::Prompting
        );
    }

    #[test]
    fn question_lists_choices() {
        let q = question("repo/init.lua", "cfg/init.lua");
        assert_eq!(
            q,
            "repo/init.lua differs from cfg/init.lua. Overwrite? ([y]es/[n]o/view [d]iff) "
        );
    }
}
