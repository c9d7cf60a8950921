//! In-memory player catalog with per-period point projections.
//!
//! - `load`: CSV ingestion of projection files
//! - `resolve`: mapping user identifiers onto catalog rows

pub mod load;
pub mod resolve;


use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cli::types::{Gameweek, PlayerId, Position};
use crate::error::{OptimiserError, Result};

pub use load::{load_catalog, read_catalog};
pub use resolve::{normalize_name, PlayerIndex};

/// A candidate player and their projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Buy price.
    pub cost: f64,
    /// Current resale price; equals `cost` when the source has no sale value.
    pub sale_value: f64,
    /// Projected points, indexed by period (0 = first gameweek in the catalog).
    pub points: Vec<f64>,
}

impl Player {
    pub fn points_at(&self, period: usize) -> f64 {
        self.points.get(period).copied().unwrap_or(0.0)
    }
}

/// Read-only table of players sharing one gameweek horizon.
#[derive(Debug, Clone)]
pub struct Catalog {
    players: Vec<Player>,
    first_gameweek: Gameweek,
    num_periods: usize,
    by_id: HashMap<PlayerId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and short projection rows.
    pub fn new(players: Vec<Player>, first_gameweek: Gameweek, num_periods: usize) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if player.points.len() < num_periods {
                return Err(OptimiserError::invalid(
                    "catalog",
                    format!(
                        "player {} has {} projections, expected {}",
                        player.id,
                        player.points.len(),
                        num_periods
                    ),
                ));
            }
            if by_id.insert(player.id, idx).is_some() {
                return Err(OptimiserError::invalid(
                    "catalog",
                    format!("duplicate player id {}", player.id),
                ));
            }
        }

        Ok(Self {
            players,
            first_gameweek,
            num_periods,
            by_id,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn first_gameweek(&self) -> Gameweek {
        self.first_gameweek
    }

    /// Number of periods with projections available.
    pub fn num_periods(&self) -> usize {
        self.num_periods
    }

    pub fn get(&self, index: PlayerIndex) -> &Player {
        &self.players[index.0]
    }

    pub fn index_of(&self, id: PlayerId) -> Option<PlayerIndex> {
        self.by_id.get(&id).copied().map(PlayerIndex)
    }

    /// Iterate rows together with their stable index.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, player)| (PlayerIndex(idx), player))
    }

    /// A copy of this catalog with the given rows removed; order is preserved.
    pub fn without(&self, removed: &[PlayerIndex]) -> Catalog {
        let players: Vec<Player> = self
            .iter()
            .filter(|(idx, _)| !removed.contains(idx))
            .map(|(_, player)| player.clone())
            .collect();
        let by_id = players
            .iter()
            .enumerate()
            .map(|(idx, player)| (player.id, idx))
            .collect();

        Catalog {
            players,
            first_gameweek: self.first_gameweek,
            num_periods: self.num_periods,
            by_id,
        }
    }
}
