//! Discounted, bench-weighted points objective.

use super::PeriodVars;
use crate::catalog::Catalog;
use crate::error::{OptimiserError, Result};
use crate::solver::LinearExpr;

/// Build the expression to maximise:
///
/// ```text
/// Σ_p discount^p · [ (1 - b) · (pts(starting[p]) + pts(captain[p]))
///                  + b · (pts(squad[p]) - pts(starting[p])) ]
/// ```
///
/// Captain points enter a second time through the captain variables, which
/// keeps the doubling linear.
pub fn compose_objective(
    catalog: &Catalog,
    periods: &[PeriodVars],
    bench_strength: f64,
    discount: f64,
) -> Result<LinearExpr> {
    for (name, value) in [("bench_strength", bench_strength), ("future_discount", discount)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(OptimiserError::invalid(
                name,
                format!("must be within [0, 1], got {}", value),
            ));
        }
    }

    let mut objective = LinearExpr::with_capacity(periods.len() * catalog.len() * 4);
    let mut weight = 1.0;
    for (p, vars) in periods.iter().enumerate() {
        let starting_weight = weight * (1.0 - bench_strength);
        let bench_weight = weight * bench_strength;

        for (idx, player) in catalog.iter() {
            let pts = player.points_at(p);
            let i = idx.0;
            objective
                .add_term(starting_weight * pts, vars.starting[i])
                .add_term(starting_weight * pts, vars.captain[i])
                .add_term(bench_weight * pts, vars.squad[i])
                .add_term(-bench_weight * pts, vars.starting[i]);
        }

        weight *= discount;
    }

    Ok(objective)
}
