//! Terminal prompter.

use itinerary_core::Prompter;
use std::io::{BufRead, Write};

/// Confirms on stdin (`y`/`yes`) unless created with `assume_yes`.
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = std::io::stderr();
        if write!(stderr, "{message} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn alert(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{is_yes, TerminalPrompter};
    use itinerary_core::Prompter;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn assume_yes_skips_stdin() {
        assert!(TerminalPrompter::new(true).confirm("Delete this day?"));
    }
}
