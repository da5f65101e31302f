use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by store and service operations.
///
/// Deletes and toggles aimed at a missing id are silent no-ops and never
/// produce `NotFound`; only explicit lookups do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
