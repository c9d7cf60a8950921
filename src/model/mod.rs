//! Integer-programming formulation of the multi-gameweek squad problem.
//!
//! - `constraints`: per-period squad, line-up, team and budget rules
//! - `continuity`: retained-player links and transfer allowances between periods
//! - `objective`: discounted, bench-weighted points objective
//! - `decode`: turning a solved assignment into a [`RosterPlan`]
//!
//! Periods are built independently; the `retained` variables added by
//! `continuity` are the only thing tying one period to the next.

pub mod constraints;
pub mod continuity;
pub mod decode;
pub mod objective;


use crate::catalog::PlayerIndex;
use crate::solver::{SolverBackend, VarRef};

pub use constraints::{add_period_constraints, PeriodSettings};
pub use continuity::{add_continuity, add_initial_squad_constraint};
pub use decode::{decode_plan, HeldSquad, PeriodPlan, PlanEntry, RosterPlan};
pub use objective::compose_objective;

/// Decision variables for one period, one entry per catalog row.
#[derive(Debug, Clone)]
pub struct PeriodVars {
    /// Player is in the squad.
    pub squad: Vec<VarRef>,
    /// Player is in the starting line-up.
    pub starting: Vec<VarRef>,
    /// Player is captain.
    pub captain: Vec<VarRef>,
}

impl PeriodVars {
    pub fn new<S: SolverBackend + ?Sized>(solver: &mut S, num_players: usize) -> Self {
        let mut alloc = || {
            (0..num_players)
                .map(|_| solver.new_boolean_variable())
                .collect::<Vec<_>>()
        };
        let squad = alloc();
        let starting = alloc();
        let captain = alloc();
        Self {
            squad,
            starting,
            captain,
        }
    }

    pub fn len(&self) -> usize {
        self.squad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squad.is_empty()
    }
}

/// Resolved player selections that hold in every period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    /// Must be in the squad.
    pub locked_in: Vec<PlayerIndex>,
    /// Must be in the squad and the starting line-up.
    pub starting: Vec<PlayerIndex>,
    /// Must be in the squad but on the bench.
    pub bench: Vec<PlayerIndex>,
}
