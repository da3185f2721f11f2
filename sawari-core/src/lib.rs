pub mod booking;
pub mod filter;
pub mod media;
pub mod ride;
pub mod user;
pub mod validate;
pub mod repository;

/// Errors surfaced by gateway implementations (remote API access).
///
/// `Rejected` carries the server's own message and is the only variant whose
/// text is shown to the user verbatim; everything else falls back to a
/// generic notice via [`GatewayError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Fallback notice for failures that carry no usable server message.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

impl GatewayError {
    /// Text suitable for an end-user notice.
    pub fn user_message(&self) -> &str {
        match self {
            GatewayError::Rejected(msg) if !msg.is_empty() => msg,
            _ => GENERIC_FAILURE,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
