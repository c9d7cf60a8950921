//! Links between consecutive periods.
//!
//! `retained[p][i]` marks player `i` as kept from period `p` to `p + 1`. A
//! retained player must be in both squads, so `squad_size - Σ retained[p]`
//! bounds the transfers made between the two periods from above.

use tracing::debug;

use super::PeriodVars;
use crate::catalog::PlayerIndex;
use crate::config::SquadRules;
use crate::solver::{LinearExpr, Relation, SolverBackend, VarRef};

/// Create `retained` variables for every adjacent period pair and bound the
/// transfers they allow.
///
/// Per pair at most `max_transfers_per_period` players change. Cumulatively,
/// after pair `p` at most `p + free_transfers` transfers have been made: one
/// free transfer accrues per period and each transfer consumes one.
pub fn add_continuity<S: SolverBackend + ?Sized>(
    solver: &mut S,
    periods: &[PeriodVars],
    rules: &SquadRules,
    free_transfers: u32,
) -> Vec<Vec<VarRef>> {
    let squad_size = rules.squad_size as f64;
    let mut retained: Vec<Vec<VarRef>> = Vec::with_capacity(periods.len().saturating_sub(1));

    for (p, pair) in periods.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let kept: Vec<VarRef> = (0..current.len())
            .map(|_| solver.new_boolean_variable())
            .collect();

        for (i, var) in kept.iter().enumerate() {
            let mut in_current = LinearExpr::with_capacity(2);
            in_current.add_term(1.0, *var).add_term(-1.0, current.squad[i]);
            solver.add_constraint(in_current, Relation::LessOrEqual, 0.0);

            let mut in_next = LinearExpr::with_capacity(2);
            in_next.add_term(1.0, *var).add_term(-1.0, next.squad[i]);
            solver.add_constraint(in_next, Relation::LessOrEqual, 0.0);
        }

        solver.add_constraint(
            LinearExpr::sum(kept.iter().copied()),
            Relation::GreaterOrEqual,
            squad_size - rules.max_transfers_per_period as f64,
        );
        retained.push(kept);

        // Σ_{k=0}^{p} (squad_size - Σ_i retained[k][i]) <= p + free_transfers
        let mut cumulative = LinearExpr::new();
        for kept in &retained {
            cumulative.add_constant(squad_size);
            for var in kept {
                cumulative.add_term(-1.0, *var);
            }
        }
        solver.add_constraint(
            cumulative,
            Relation::LessOrEqual,
            (p as u32 + free_transfers) as f64,
        );
    }

    debug!(pairs = retained.len(), "continuity constraints added");
    retained
}

/// Keep at least `squad_size - free_transfers` of the manager's current
/// squad in the first period. Returns whether a constraint was added.
///
/// `current` holds indices into the same catalog as `first`; current players
/// missing from it (e.g. excluded) simply cannot be kept.
pub fn add_initial_squad_constraint<S: SolverBackend + ?Sized>(
    solver: &mut S,
    first: &PeriodVars,
    current: &[PlayerIndex],
    rules: &SquadRules,
    free_transfers: u32,
) -> bool {
    let required = rules.squad_size.saturating_sub(free_transfers as usize);
    if required == 0 {
        return false;
    }

    solver.add_constraint(
        LinearExpr::sum(current.iter().map(|idx| first.squad[idx.0])),
        Relation::GreaterOrEqual,
        required as f64,
    );
    debug!(required, "initial squad constraint added");
    true
}
