use reqwest::Client;
use std::sync::LazyLock;
use tracing::debug;

use crate::{
    cli::types::{EntryId, Gameweek},
    fpl::types::{BootstrapStatic, EntryPicks},
    Result,
};

/// Base path for the public FPL API.
pub const FPL_BASE_URL: &str = "https://fantasy.premierleague.com/api";

static HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .user_agent(concat!("fpl-optimiser/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T> {
    debug!(url, "GET");
    let res = HTTP
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?;
    Ok(res)
}

pub async fn get_bootstrap_static() -> Result<BootstrapStatic> {
    get_json(&format!("{FPL_BASE_URL}/bootstrap-static/")).await
}

pub async fn get_entry_picks(entry: EntryId, gameweek: Gameweek) -> Result<EntryPicks> {
    let url = format!(
        "{FPL_BASE_URL}/entry/{}/event/{}/picks/",
        entry.as_u32(),
        gameweek.as_u16()
    );
    get_json(&url).await
}
