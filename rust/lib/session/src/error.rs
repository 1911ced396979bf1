use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(String),

    #[error("session value is not valid UTF-8: {0}")]
    Encoding(String),
}
