use engine::EngineError;
use thiserror::Error;

/// Failure of a single API call.
///
/// Status-derived variants follow the HTTP status of the response; the
/// remaining ones cover the cases where no usable response arrived.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    /// 2xx response whose envelope says `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The body did not match the endpoint schema.
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Server(message),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Failure of a [`BudgetSession`](crate::BudgetSession) operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type ResultSession<T> = std::result::Result<T, SessionError>;
