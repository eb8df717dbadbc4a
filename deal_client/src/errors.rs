use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Could not reach the DealStream server. {0}")]
    Transport(String),
    #[error("The server responded with status {status}. {message}")]
    Status { status: u16, message: String },
    #[error("Could not read the server's response. {0}")]
    Decode(String),
    #[error("Invalid server url. {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
