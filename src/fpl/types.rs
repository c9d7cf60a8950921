//! Wire types for the public FPL endpoints.

use serde::{Deserialize, Serialize};

use crate::cli::types::{Gameweek, Identifier};
use crate::config::CurrentSquad;

/// The bits of `bootstrap-static/` this crate reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapStatic {
    pub events: Vec<Event>,
}

impl BootstrapStatic {
    pub fn next_gameweek(&self) -> Option<Gameweek> {
        self.events
            .iter()
            .find(|event| event.is_next)
            .map(|event| Gameweek::new(event.id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u16,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

/// Response of `entry/{id}/event/{gw}/picks/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPicks {
    pub picks: Vec<Pick>,
    pub entry_history: EntryHistory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    /// Catalog player id.
    pub element: u32,
    pub position: u8,
    #[serde(default)]
    pub multiplier: u8,
    #[serde(default)]
    pub is_captain: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryHistory {
    pub event: u16,
    /// Bank balance in tenths of a million.
    pub bank: i64,
    /// Squad value in tenths of a million.
    #[serde(default)]
    pub value: i64,
}

impl EntryPicks {
    /// Bank balance in millions.
    pub fn bank(&self) -> f64 {
        self.entry_history.bank as f64 / 10.0
    }

    pub fn current_squad(&self) -> CurrentSquad {
        CurrentSquad {
            players: self
                .picks
                .iter()
                .map(|pick| Identifier::ById(pick.element))
                .collect(),
            bank: self.bank(),
        }
    }
}
