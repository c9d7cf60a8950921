use std::path::PathBuf;

use crate::{
    catalog::{load_catalog, Catalog, Player},
    cli::{types::PlayerId, SquadSource},
    commands::resolve_entry_id,
    error::OptimiserError,
    fpl::{fetch_current_picks, EntryPicks},
    report::render_squad,
    Result,
};

/// Look up every pick in the catalog by id.
pub fn squad_players(catalog: &Catalog, picks: &EntryPicks) -> Result<Vec<Player>> {
    picks
        .picks
        .iter()
        .map(|pick| {
            let id = PlayerId::new(pick.element);
            catalog
                .index_of(id)
                .map(|idx| catalog.get(idx).clone())
                .ok_or_else(|| OptimiserError::NotFound {
                    identifier: format!("id {}", id),
                })
        })
        .collect()
}

/// Handle the current-squad command
pub async fn handle_current_squad(source: SquadSource, data: Option<PathBuf>) -> Result<()> {
    let entry = resolve_entry_id(source.entry)?;
    let (next, picks) = fetch_current_picks(entry, source.refresh).await?;

    println!("Entry {} ahead of GW {}", entry, next); // tarpaulin::skip
    match data {
        Some(path) => {
            let catalog = load_catalog(&path)?;
            let players = squad_players(&catalog, &picks)?;
            print!("{}", render_squad(&players, picks.bank())); // tarpaulin::skip
        }
        None => {
            let ids: Vec<String> = picks.picks.iter().map(|p| p.element.to_string()).collect();
            println!("Players: {}", ids.join(", ")); // tarpaulin::skip
            println!("In the bank: £{:.1}m", picks.bank()); // tarpaulin::skip
        }
    }

    Ok(())
}
