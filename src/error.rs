//! Error types for the FPL squad optimiser

use thiserror::Error;

use crate::cli::types::PlayerId;

pub type Result<T> = std::result::Result<T, OptimiserError>;

#[derive(Error, Debug)]
pub enum OptimiserError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Player not found: {identifier}")]
    NotFound { identifier: String },

    #[error(
        "More than one player matches {query:?} ({}); specify which one you mean by id instead",
        format_candidates(.candidates)
    )]
    Ambiguous {
        query: String,
        candidates: Vec<(PlayerId, String)>,
    },

    #[error("No squad satisfies every constraint")]
    Infeasible,

    #[error("Solver reported an unbounded objective")]
    Unbounded,

    #[error("Internal invariant violated: {message}")]
    Internal { message: String },

    #[error("Solver error: {message}")]
    Solver { message: String },

    #[error("Catalog is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Entry ID not provided and {env_var} environment variable not set")]
    MissingEntryId { env_var: String },

    #[error("Failed to parse integer: {0}")]
    InvalidInteger(#[from] std::num::ParseIntError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OptimiserError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        OptimiserError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

fn format_candidates(candidates: &[(PlayerId, String)]) -> String {
    candidates
        .iter()
        .map(|(id, name)| format!("{} [id {}]", name, id))
        .collect::<Vec<_>>()
        .join(", ")
}
