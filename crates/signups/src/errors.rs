use thiserror::Error;

/// Failures surfaced by a [`crate::SignupHost`] implementation.
///
/// Generators treat every variant as a per-item failure: the offending item
/// is skipped and the batch continues.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("rejected by host: {0}")]
    Rejected(String),

    #[error("no open spots left for this task date")]
    SlotFull,

    #[error("record not found")]
    NotFound,

    #[error("host not reachable at {0}")]
    Unreachable(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
