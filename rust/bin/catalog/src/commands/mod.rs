pub mod app;
pub mod config;
pub mod output;
pub mod pages;
pub mod session;

use std::io::Write;

use catalog::confirm::Confirm;

/// Read one trimmed line from stdin after printing `prompt` to stderr.
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// `[y/N]` prompt on stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        match prompt_line(&format!("{} [y/N]: ", message)) {
            Ok(answer) => answer.eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }
}
