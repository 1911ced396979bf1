use thiserror::Error;

/// Data service error.
///
/// `Display` is the message shown to the user; server messages pass
/// through verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("encode: {0}")]
    Encode(String),
}

impl ServiceError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Server {
            status,
            message: message.into(),
        }
    }
}
