#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session expired, log in again and refresh the token")]
    Unauthorized,
    #[error("you do not have permission to perform this action")]
    Forbidden,
    #[error("you do not have permission to perform this action (requires '{0}')")]
    NotPermitted(String),
    #[error("no API token configured; pass --token, --token-file or set LEDGERVIEW_TOKEN")]
    MissingToken,
    #[error("{message}")]
    Rejected { message: String },
    #[error("response envelope has no data")]
    EmptyEnvelope,
    #[error("server returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}
