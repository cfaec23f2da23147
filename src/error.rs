use crate::repository;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("missing credential")]
    MissingCredential,

    #[error("server rejected request: {0}")]
    ServerRejected(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("history storage error: {0}")]
    History(#[from] repository::Error),

    ///
    /// This error should be returned only in situations
    /// that should never occur when system is setup correctly.
    ///
    #[error("unexpected error: {0}")]
    UnexpectedError(#[from] anyhow::Error),
}

/// Maps a non-2xx response to [Error::ServerRejected] with the status text.
pub(crate) fn reject_failed(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    match status.is_success() {
        true => Ok(response),
        false => Err(Error::ServerRejected(status.to_string())),
    }
}
