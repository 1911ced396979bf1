//! Login form state: `auth/login`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LoginPhase {
    /// Form editable; shows `error` from the last attempt, if any.
    #[default]
    Idle,
    Submitting,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginState {
    pub phase: LoginPhase,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rendered challenge the user must type back.
    pub challenge: String,
}

impl LoginState {
    pub const PATH: &'static str = "auth/login";

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            "Logging in..."
        } else {
            "Login"
        }
    }
}
