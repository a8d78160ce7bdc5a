use thiserror::Error;

pub type OpenAqClientResult<T> = Result<T, OpenAqError>;

#[derive(Error, Debug)]
pub enum OpenAqError {
    #[error("Request to OpenAQ failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("OpenAQ returned unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to decode OpenAQ response body: {0}")]
    Decode(#[source] reqwest::Error),
}
