// Crate-level error types
// An unsatisfiable model is never an error: it yields an empty solution list

use std::path::PathBuf;

use thiserror::Error;

use super::engine::SolverError;

/// Errors raised while resolving, validating or solving a compound.
#[derive(Debug, Error)]
pub enum Error {
    /// An element amount is not an exact integer.
    #[error("atom count for element {symbol} must be an integer, got {amount}")]
    NonIntegralCount {
        /// Element symbol.
        symbol: String,
        /// Amount as supplied by the resolver.
        amount: f64,
    },

    /// The composition itself is unusable (empty, negative or duplicated amounts).
    #[error("invalid composition: {0}")]
    InvalidComposition(String),

    /// Candidate ions do not line up with the composition.
    #[error("malformed candidate ion set: {0}")]
    MalformedIonSet(String),

    /// A configuration value is not one of the accepted names.
    #[error("unrecognized option for {option}: '{value}'")]
    UnrecognizedOption {
        /// Which option was being parsed.
        option: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The element symbol is not in the periodic table data.
    #[error("unknown element symbol: '{0}'")]
    UnknownElement(String),

    /// The chemical formula could not be parsed.
    #[error("failed to parse formula '{formula}': {reason}")]
    FormulaParse {
        /// Formula text as given.
        formula: String,
        /// What went wrong.
        reason: String,
    },

    /// Failed to parse a TOML configuration.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to read a configuration file.
    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The constraint engine failed or rejected the model.
    #[error(transparent)]
    Engine(#[from] SolverError),
}

impl Error {
    /// Creates a [`FormulaParse`](Error::FormulaParse) error.
    pub fn formula_parse(formula: &str, reason: impl Into<String>) -> Self {
        Self::FormulaParse {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
