//! Error type shared by every evaluation stage.

use ndarray_npy::ReadNpyError;

/// Result alias defaulting to [`EvalError`].
pub type Result<T, E = EvalError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid state: matrix has {rows} rows but vocab has {vocab_size} entries")]
    InvalidState { rows: usize, vocab_size: usize },

    #[error("token: {0} is not in vocab")]
    UnknownWord(String),

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("vector of id {id} has zero or non-finite norm")]
    DegenerateVector { id: usize },

    #[error("invalid vocab: {0}")]
    InvalidVocab(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Npy(#[from] ReadNpyError),
}
