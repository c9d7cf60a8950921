//! Fantasy Premier League API access: the next gameweek and a manager's picks.

pub mod cache;
pub mod http;
pub mod types;

pub use cache::{load_or_fetch_picks, picks_path, try_read_to_string, write_string};
pub use http::{get_bootstrap_static, get_entry_picks, FPL_BASE_URL};
pub use types::{BootstrapStatic, EntryHistory, EntryPicks, Event, Pick};

use crate::{
    cli::types::{EntryId, Gameweek},
    error::OptimiserError,
    Result,
};

/// Gameweek whose picks describe the squad a manager holds right now: the one
/// before the next deadline.
pub fn picks_gameweek(next: Gameweek) -> Result<Gameweek> {
    next.previous().ok_or_else(|| {
        OptimiserError::invalid(
            "gameweek",
            format!("GW {} has no previous gameweek to read picks from", next),
        )
    })
}

/// Look up the next gameweek, then load (or fetch) the picks that precede it.
pub async fn fetch_current_picks(entry: EntryId, refresh: bool) -> Result<(Gameweek, EntryPicks)> {
    let bootstrap = get_bootstrap_static().await?;
    let next = bootstrap.next_gameweek().ok_or_else(|| {
        OptimiserError::invalid("gameweek", "the season has no upcoming gameweek")
    })?;
    let picks = load_or_fetch_picks(entry, picks_gameweek(next)?, refresh).await?;
    Ok((next, picks))
}
