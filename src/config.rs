//! Optimisation run configuration and the squad rule table.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::Catalog;
use crate::cli::types::{Identifier, Position};
use crate::error::{OptimiserError, Result};

/// Per-position squad composition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRule {
    pub position: Position,
    /// Exact number of this position in the squad.
    pub squad_count: usize,
    pub min_starting: usize,
    pub max_starting: usize,
}

impl PositionRule {
    pub const fn new(
        position: Position,
        squad_count: usize,
        min_starting: usize,
        max_starting: usize,
    ) -> Self {
        Self {
            position,
            squad_count,
            min_starting,
            max_starting,
        }
    }

    pub fn allows_starting(&self, count: usize) -> bool {
        (self.min_starting..=self.max_starting).contains(&count)
    }
}

/// Squad shape, indexed by [`Position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadRules {
    pub squad_size: usize,
    pub starting_size: usize,
    /// Upper bound on transfers between two consecutive periods.
    pub max_transfers_per_period: usize,
    /// One rule per position, in `Position::ALL` order.
    pub positions: [PositionRule; 4],
}

impl Default for SquadRules {
    fn default() -> Self {
        Self::fpl()
    }
}

impl SquadRules {
    /// Fantasy Premier League rules: 2 GK, 5 DEF, 5 MID, 3 FWD; XI with
    /// 1 GK, 3-5 DEF, 2-5 MID, 1-3 FWD.
    pub fn fpl() -> Self {
        Self {
            squad_size: 15,
            starting_size: 11,
            max_transfers_per_period: 2,
            positions: [
                PositionRule::new(Position::GK, 2, 1, 1),
                PositionRule::new(Position::DEF, 5, 3, 5),
                PositionRule::new(Position::MID, 5, 2, 5),
                PositionRule::new(Position::FWD, 3, 1, 3),
            ],
        }
    }

    pub fn rule(&self, position: Position) -> &PositionRule {
        &self.positions[position.index()]
    }

    pub fn validate(&self) -> Result<()> {
        for (rule, expected) in self.positions.iter().zip(Position::ALL) {
            if rule.position != expected {
                return Err(OptimiserError::invalid(
                    "squad_rules",
                    format!("rule for {} listed where {} belongs", rule.position, expected),
                ));
            }
            if rule.min_starting > rule.max_starting || rule.max_starting > rule.squad_count {
                return Err(OptimiserError::invalid(
                    "squad_rules",
                    format!(
                        "{} needs min <= max <= squad count, got {}..={} of {}",
                        rule.position, rule.min_starting, rule.max_starting, rule.squad_count
                    ),
                ));
            }
        }

        let squad_total: usize = self.positions.iter().map(|r| r.squad_count).sum();
        if squad_total != self.squad_size {
            return Err(OptimiserError::invalid(
                "squad_rules",
                format!(
                    "position counts sum to {} but squad size is {}",
                    squad_total, self.squad_size
                ),
            ));
        }

        let min_total: usize = self.positions.iter().map(|r| r.min_starting).sum();
        let max_total: usize = self.positions.iter().map(|r| r.max_starting).sum();
        if self.starting_size < min_total || self.starting_size > max_total {
            return Err(OptimiserError::invalid(
                "squad_rules",
                format!(
                    "starting size {} outside the {}..={} allowed by the position bands",
                    self.starting_size, min_total, max_total
                ),
            ));
        }

        if self.max_transfers_per_period > self.squad_size {
            return Err(OptimiserError::invalid(
                "squad_rules",
                "max transfers per period exceeds squad size",
            ));
        }

        Ok(())
    }
}

/// Which price counts against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum PriceBasis {
    Cost,
    #[default]
    SaleValue,
}

/// Exact starting counts requested per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingCounts {
    pub gk: Option<usize>,
    pub def: Option<usize>,
    pub mid: Option<usize>,
    pub fwd: Option<usize>,
}

impl StartingCounts {
    pub fn get(&self, position: Position) -> Option<usize> {
        match position {
            Position::GK => self.gk,
            Position::DEF => self.def,
            Position::MID => self.mid,
            Position::FWD => self.fwd,
        }
    }
}

/// The squad the manager currently owns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentSquad {
    pub players: Vec<Identifier>,
    /// Cash in the bank.
    pub bank: f64,
}

/// Everything one optimisation run needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimiserConfig {
    pub num_periods: usize,
    /// Fixed budget; derived from the current squad when absent.
    pub budget: Option<f64>,
    pub free_transfers: u32,
    pub wildcard: bool,
    pub bench_strength: f64,
    pub future_discount: f64,
    pub max_from_team: usize,
    pub banned_teams: Vec<String>,
    pub locked_in: Vec<Identifier>,
    pub excluded: Vec<Identifier>,
    pub starting_pinned: Vec<Identifier>,
    pub bench_pinned: Vec<Identifier>,
    pub starting_counts: StartingCounts,
    pub squad_rules: SquadRules,
    pub price_basis: PriceBasis,
    pub current_squad: Option<CurrentSquad>,
}

impl Default for OptimiserConfig {
    fn default() -> Self {
        Self {
            num_periods: 1,
            budget: None,
            free_transfers: 1,
            wildcard: false,
            bench_strength: 0.1,
            future_discount: 1.0,
            max_from_team: 3,
            banned_teams: Vec::new(),
            locked_in: Vec::new(),
            excluded: Vec::new(),
            starting_pinned: Vec::new(),
            bench_pinned: Vec::new(),
            starting_counts: StartingCounts::default(),
            squad_rules: SquadRules::fpl(),
            price_basis: PriceBasis::default(),
            current_squad: None,
        }
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OptimiserError::invalid(
            name,
            format!("must be within [0, 1], got {}", value),
        ))
    }
}

impl OptimiserConfig {
    /// Read a config from a JSON file; absent keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Starting count for a position pinned by the caller, if any.
    pub fn pinned_starting(&self, position: Position) -> Option<usize> {
        self.starting_counts.get(position)
    }

    /// Check every parameter before any model is built.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        self.squad_rules.validate()?;

        if self.num_periods == 0 {
            return Err(OptimiserError::invalid("num_periods", "must be at least 1"));
        }
        if self.num_periods > catalog.num_periods() {
            return Err(OptimiserError::invalid(
                "num_periods",
                format!(
                    "catalog only has projections for {} gameweek(s), asked for {}",
                    catalog.num_periods(),
                    self.num_periods
                ),
            ));
        }

        check_unit_interval("bench_strength", self.bench_strength)?;
        check_unit_interval("future_discount", self.future_discount)?;

        if self.max_from_team == 0 {
            return Err(OptimiserError::invalid("max_from_team", "must be at least 1"));
        }

        match (self.budget, &self.current_squad) {
            (Some(budget), _) if !budget.is_finite() || budget < 0.0 => {
                return Err(OptimiserError::invalid(
                    "budget",
                    format!("must be a non-negative number, got {}", budget),
                ));
            }
            (None, None) => {
                return Err(OptimiserError::invalid(
                    "budget",
                    "required when no current squad is given",
                ));
            }
            _ => {}
        }

        if let Some(current) = &self.current_squad {
            if !current.bank.is_finite() || current.bank < 0.0 {
                return Err(OptimiserError::invalid(
                    "bank",
                    format!("must be a non-negative number, got {}", current.bank),
                ));
            }
        }

        for position in Position::ALL {
            if let Some(count) = self.pinned_starting(position) {
                let rule = self.squad_rules.rule(position);
                if !rule.allows_starting(count) {
                    return Err(OptimiserError::invalid(
                        position.to_string(),
                        format!(
                            "starting count {} outside the legal range {}..={}",
                            count, rule.min_starting, rule.max_starting
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}
