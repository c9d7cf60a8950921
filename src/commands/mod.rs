//! Command implementations for the FPL optimiser CLI

pub mod current_squad;
pub mod optimise;

use crate::{cli::types::EntryId, error::OptimiserError, Result, ENTRY_ID_ENV_VAR};

/// Use the given entry ID, falling back to the `FPL_ENTRY_ID` env var.
pub fn resolve_entry_id(entry: Option<EntryId>) -> Result<EntryId> {
    entry
        .or_else(|| {
            std::env::var(ENTRY_ID_ENV_VAR)
                .ok()
                .and_then(|s| s.parse::<EntryId>().ok())
        })
        .ok_or_else(|| OptimiserError::MissingEntryId {
            env_var: ENTRY_ID_ENV_VAR.to_string(),
        })
}

#[cfg(test)]
mod tests;
