//! Blocking yes/no prompt used before destructive actions.

pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes (`--yes` flag, scripted runs).
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Answers no.
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}
