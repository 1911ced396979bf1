//! Human-presence challenge shown on the login form.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// A challenge the user must read and type back.
pub trait Challenge: Send + Sync {
    /// Start a new challenge of `length` characters.
    fn load(&mut self, length: usize);

    /// Displayable form of the current challenge.
    fn render(&self) -> String;

    /// Exact, case-sensitive comparison against the current challenge.
    /// A mismatch loads a new challenge of the same length.
    fn validate(&mut self, input: &str) -> bool;
}

/// Random alphanumeric code, rendered with spaces between characters.
#[derive(Debug, Default)]
pub struct TextChallenge {
    code: String,
    length: usize,
    fixed: Option<String>,
}

impl TextChallenge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A challenge that always loads `code` (for scripted front-ends and tests).
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            fixed: Some(code.into()),
            ..Self::default()
        }
    }
}

impl Challenge for TextChallenge {
    fn load(&mut self, length: usize) {
        self.length = length;
        self.code = match &self.fixed {
            Some(code) => code.clone(),
            None => rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(length)
                .map(char::from)
                .collect(),
        };
    }

    fn render(&self) -> String {
        let chars: Vec<String> = self.code.chars().map(String::from).collect();
        chars.join(" ")
    }

    fn validate(&mut self, input: &str) -> bool {
        if !self.code.is_empty() && input == self.code {
            return true;
        }
        if self.length > 0 {
            self.load(self.length);
        }
        false
    }
}
