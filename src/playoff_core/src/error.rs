//! Error taxonomy for loading, bracket construction and game resolution.

use std::path::PathBuf;

use crate::team::Conference;

/// Errors raised while loading data or simulating a bracket.
///
/// None of these are recoverable inside a trial: they indicate bad input
/// data or a broken bracket, and propagate to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed bracket configuration: {0}")]
    BracketConfig(#[from] toml::de::Error),

    #[error("data error: {0}")]
    Data(String),

    #[error("no {conference} matchup probability for {away} at {home}")]
    MissingMatchup {
        conference: Conference,
        away: String,
        home: String,
    },

    #[error("team not found: {0}")]
    NotFound(String),

    #[error("invalid bracket: {0}")]
    InvalidBracket(String),

    #[error("favored outcome is ambiguous for {away} at {home}: both sides at {probability}")]
    AmbiguousOutcome {
        away: String,
        home: String,
        probability: f64,
    },

    #[error("unknown decision method {0:?} (expected seed, random or favored)")]
    InvalidMethod(String),

    #[error("invalid simulation options: {0}")]
    InvalidOptions(String),

    #[error("statistics error: {0}")]
    Stats(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error comes from malformed or incomplete input data.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Csv(_)
                | Error::BracketConfig(_)
                | Error::Data(_)
                | Error::MissingMatchup { .. }
        )
    }
}
