//! Decoding a solved assignment into a multi-gameweek plan.

use serde::{Deserialize, Serialize};

use super::PeriodVars;
use crate::catalog::{Catalog, Player};
use crate::cli::types::{Gameweek, PlayerId, Position};
use crate::config::{PriceBasis, SquadRules};
use crate::error::{OptimiserError, Result};
use crate::solver::SolverBackend;

/// One player as shown in a period of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Price under the run's price basis.
    pub price: f64,
    /// Projected points for this period, before any captain bonus.
    pub points: f64,
    pub is_captain: bool,
}

impl PlanEntry {
    fn from_player(player: &Player, period: usize, price_basis: PriceBasis) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            team: player.team.clone(),
            position: player.position,
            price: match price_basis {
                PriceBasis::Cost => player.cost,
                PriceBasis::SaleValue => player.sale_value,
            },
            points: player.points_at(period),
            is_captain: false,
        }
    }

    /// Points this player contributes, doubled for the captain.
    pub fn scored_points(&self) -> f64 {
        if self.is_captain {
            self.points * 2.0
        } else {
            self.points
        }
    }
}

/// Squad, line-up and transfers for one gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPlan {
    pub gameweek: Gameweek,
    /// Starting line-up by position, then descending points.
    pub starting: Vec<PlanEntry>,
    /// Bench in substitution order: goalkeeper first, then descending points.
    pub bench: Vec<PlanEntry>,
    pub captain: PlayerId,
    /// Raw starting points, captain counted once.
    pub starting_points: f64,
    /// Extra points from the captain's doubling.
    pub captain_bonus: f64,
    pub bench_points: f64,
    pub squad_value: f64,
    pub transfers_in: Vec<PlanEntry>,
    pub transfers_out: Vec<PlanEntry>,
}

impl PeriodPlan {
    /// Whole squad in display order.
    pub fn squad(&self) -> impl Iterator<Item = &PlanEntry> {
        self.starting.iter().chain(self.bench.iter())
    }

    pub fn squad_ids(&self) -> Vec<PlayerId> {
        self.squad().map(|entry| entry.id).collect()
    }

    /// Points scored by the line-up including the captain bonus.
    pub fn points(&self) -> f64 {
        self.starting_points + self.captain_bonus
    }
}

/// The manager's squad and bank going into the first period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldSquad {
    pub players: Vec<Player>,
    pub bank: f64,
}

/// The complete optimised plan across the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlan {
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_squad: Option<HeldSquad>,
    pub periods: Vec<PeriodPlan>,
    /// Starting points including captain bonuses, summed over all periods.
    pub total_starting_points: f64,
    pub total_bench_points: f64,
}

impl RosterPlan {
    pub fn first_gameweek(&self) -> Option<Gameweek> {
        self.periods.first().map(|p| p.gameweek)
    }

    pub fn last_gameweek(&self) -> Option<Gameweek> {
        self.periods.last().map(|p| p.gameweek)
    }
}

fn internal(message: String) -> OptimiserError {
    OptimiserError::Internal { message }
}

/// Read the optimal assignment back out of `solver`.
///
/// `current` is the manager's squad and bank before the first period, used to
/// report first-period transfers; players in it need not be in `catalog`.
pub fn decode_plan<S: SolverBackend + ?Sized>(
    solver: &S,
    catalog: &Catalog,
    periods: &[PeriodVars],
    rules: &SquadRules,
    price_basis: PriceBasis,
    budget: f64,
    current: Option<(&[Player], f64)>,
) -> Result<RosterPlan> {
    let mut plans: Vec<PeriodPlan> = Vec::with_capacity(periods.len());
    let mut previous: Option<Vec<PlanEntry>> = current.map(|(players, _)| {
        players
            .iter()
            .map(|p| PlanEntry::from_player(p, 0, price_basis))
            .collect()
    });

    for (p, vars) in periods.iter().enumerate() {
        let mut starting = Vec::new();
        let mut bench = Vec::new();
        let mut captain = None;

        for (idx, player) in catalog.iter() {
            let i = idx.0;
            let in_squad = solver.value_of(vars.squad[i])?;
            let in_xi = solver.value_of(vars.starting[i])?;
            let is_captain = solver.value_of(vars.captain[i])?;

            if (in_xi && !in_squad) || (is_captain && !in_xi) {
                return Err(internal(format!(
                    "player {} violates captain <= starting <= squad in period {}",
                    player.id, p
                )));
            }
            if !in_squad {
                continue;
            }

            let mut entry = PlanEntry::from_player(player, p, price_basis);
            if is_captain {
                if captain.is_some() {
                    return Err(internal(format!("more than one captain in period {}", p)));
                }
                entry.is_captain = true;
                captain = Some(player.id);
            }
            if in_xi {
                starting.push(entry);
            } else {
                bench.push(entry);
            }
        }

        let captain = captain.ok_or_else(|| internal(format!("no captain in period {}", p)))?;
        if starting.len() != rules.starting_size
            || starting.len() + bench.len() != rules.squad_size
        {
            return Err(internal(format!(
                "period {} decoded {} starters and {} on the bench",
                p,
                starting.len(),
                bench.len()
            )));
        }

        // Stable sorts keep catalog order on ties.
        starting.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(b.points.total_cmp(&a.points))
        });
        bench.sort_by(|a, b| {
            let a_gk = a.position == Position::GK;
            let b_gk = b.position == Position::GK;
            b_gk.cmp(&a_gk).then_with(|| {
                if a_gk && b_gk {
                    std::cmp::Ordering::Equal
                } else {
                    b.points.total_cmp(&a.points)
                }
            })
        });

        let starting_points: f64 = starting.iter().map(|e| e.points).sum();
        let captain_bonus: f64 = starting
            .iter()
            .filter(|e| e.is_captain)
            .map(|e| e.points)
            .sum();
        let bench_points: f64 = bench.iter().map(|e| e.points).sum();
        let squad_value: f64 = starting.iter().chain(&bench).map(|e| e.price).sum();

        let squad: Vec<PlanEntry> = starting.iter().chain(&bench).cloned().collect();
        let (transfers_in, transfers_out) = match &previous {
            Some(before) => squad_difference(before, &squad),
            None => (Vec::new(), Vec::new()),
        };

        plans.push(PeriodPlan {
            gameweek: catalog.first_gameweek().offset(p),
            starting,
            bench,
            captain,
            starting_points,
            captain_bonus,
            bench_points,
            squad_value,
            transfers_in,
            transfers_out,
        });
        previous = Some(squad);
    }

    let total_starting_points = plans.iter().map(PeriodPlan::points).sum();
    let total_bench_points = plans.iter().map(|p| p.bench_points).sum();

    Ok(RosterPlan {
        budget,
        current_squad: current.map(|(players, bank)| HeldSquad {
            players: players.to_vec(),
            bank,
        }),
        periods: plans,
        total_starting_points,
        total_bench_points,
    })
}

/// Players brought in and sold between two squads.
fn squad_difference(before: &[PlanEntry], after: &[PlanEntry]) -> (Vec<PlanEntry>, Vec<PlanEntry>) {
    let contains = |squad: &[PlanEntry], id: PlayerId| squad.iter().any(|e| e.id == id);
    let unmark = |entry: &PlanEntry| PlanEntry {
        is_captain: false,
        ..entry.clone()
    };

    let transfers_in = after
        .iter()
        .filter(|e| !contains(before, e.id))
        .map(unmark)
        .collect();
    let transfers_out = before
        .iter()
        .filter(|e| !contains(after, e.id))
        .map(unmark)
        .collect();
    (transfers_in, transfers_out)
}
