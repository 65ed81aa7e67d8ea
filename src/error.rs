//! Error types for the Nim crate

use thiserror::Error;

/// Main error type for the Nim crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("game already over")]
    GameAlreadyOver,

    #[error("invalid pile {pile} (there are {pile_count} piles)")]
    InvalidPile { pile: usize, pile_count: usize },

    #[error("invalid count {count} for pile {pile} (must be between 1 and {available})")]
    InvalidCount {
        pile: usize,
        count: u32,
        available: u32,
    },

    #[error("no legal actions available for piles {piles}")]
    NoLegalActions { piles: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid pile configuration '{input}': {reason}")]
    InvalidPiles { input: String, reason: String },

    #[error("move input closed before the game finished")]
    InputClosed,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
