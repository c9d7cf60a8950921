//! On-disk cache for manager picks.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    cli::types::{EntryId, Gameweek},
    fpl::{http::get_entry_picks, types::EntryPicks},
    Result,
};

/// Path: ~/.cache/fpl-optimiser/picks_{entry}_{gameweek}.json
pub fn picks_path(entry: EntryId, gameweek: Gameweek) -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("fpl-optimiser")
        .join(format!("picks_{}_{}.json", entry, gameweek))
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Parse cached picks, ignoring files that no longer deserialize.
pub fn read_cached_picks(path: &Path) -> Option<EntryPicks> {
    let s = try_read_to_string(path)?;
    match serde_json::from_str(&s) {
        Ok(picks) => Some(picks),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable picks cache");
            None
        }
    }
}

/// Picks for a finished gameweek never change, so the cache is used unless
/// `refresh` is set.
pub async fn load_or_fetch_picks(
    entry: EntryId,
    gameweek: Gameweek,
    refresh: bool,
) -> Result<EntryPicks> {
    let path = picks_path(entry, gameweek);

    if !refresh {
        if let Some(picks) = read_cached_picks(&path) {
            debug!(path = %path.display(), "picks cache hit");
            return Ok(picks);
        }
    }

    let picks = get_entry_picks(entry, gameweek).await?;

    if let Ok(json_str) = serde_json::to_string_pretty(&picks) {
        if let Err(e) = write_string(&path, &json_str) {
            warn!(path = %path.display(), error = %e, "failed to write picks cache");
        }
    }

    Ok(picks)
}
