//! Per-period constraints: squad shape, team quotas, budget and selections.

use std::collections::BTreeMap;

use tracing::debug;

use super::{PeriodVars, Selections};
use crate::catalog::Catalog;
use crate::config::{PriceBasis, SquadRules, StartingCounts};
use crate::error::{OptimiserError, Result};
use crate::solver::{LinearExpr, Relation, SolverBackend};

/// Rules shared by every period of one run.
#[derive(Debug, Clone)]
pub struct PeriodSettings<'a> {
    pub rules: &'a SquadRules,
    pub starting_counts: StartingCounts,
    pub max_from_team: usize,
    pub banned_teams: &'a [String],
    pub budget: f64,
    pub price_basis: PriceBasis,
    pub selections: &'a Selections,
}

impl PeriodSettings<'_> {
    fn price(&self, cost: f64, sale_value: f64) -> f64 {
        match self.price_basis {
            PriceBasis::Cost => cost,
            PriceBasis::SaleValue => sale_value,
        }
    }

    fn is_banned(&self, team_key: &str) -> bool {
        self.banned_teams
            .iter()
            .any(|banned| banned.trim().to_lowercase() == team_key)
    }
}

/// Emit every single-period constraint for `vars`; returns how many were added.
pub fn add_period_constraints<S: SolverBackend + ?Sized>(
    solver: &mut S,
    catalog: &Catalog,
    vars: &PeriodVars,
    settings: &PeriodSettings<'_>,
) -> Result<usize> {
    if vars.len() != catalog.len() {
        return Err(OptimiserError::Internal {
            message: format!(
                "period has {} variables for {} catalog rows",
                vars.len(),
                catalog.len()
            ),
        });
    }

    let mut added = 0usize;
    let mut emit = |solver: &mut S, expr: LinearExpr, relation: Relation, bound: f64| {
        solver.add_constraint(expr, relation, bound);
        added += 1;
    };

    // captain <= starting <= squad
    for i in 0..vars.len() {
        let mut captain_in_xi = LinearExpr::with_capacity(2);
        captain_in_xi
            .add_term(1.0, vars.captain[i])
            .add_term(-1.0, vars.starting[i]);
        emit(solver, captain_in_xi, Relation::LessOrEqual, 0.0);

        let mut xi_in_squad = LinearExpr::with_capacity(2);
        xi_in_squad
            .add_term(1.0, vars.starting[i])
            .add_term(-1.0, vars.squad[i]);
        emit(solver, xi_in_squad, Relation::LessOrEqual, 0.0);
    }

    let rules = settings.rules;
    emit(
        solver,
        LinearExpr::sum(vars.squad.iter().copied()),
        Relation::Equal,
        rules.squad_size as f64,
    );
    emit(
        solver,
        LinearExpr::sum(vars.starting.iter().copied()),
        Relation::Equal,
        rules.starting_size as f64,
    );
    emit(
        solver,
        LinearExpr::sum(vars.captain.iter().copied()),
        Relation::Equal,
        1.0,
    );

    // Position quotas
    for rule in &rules.positions {
        let members: Vec<usize> = catalog
            .iter()
            .filter(|(_, p)| p.position == rule.position)
            .map(|(idx, _)| idx.0)
            .collect();

        emit(
            solver,
            LinearExpr::sum(members.iter().map(|i| vars.squad[*i])),
            Relation::Equal,
            rule.squad_count as f64,
        );

        let starters = || LinearExpr::sum(members.iter().map(|i| vars.starting[*i]));
        match settings.starting_counts.get(rule.position) {
            Some(count) => {
                if !rule.allows_starting(count) {
                    return Err(OptimiserError::invalid(
                        rule.position.to_string(),
                        format!(
                            "starting count {} outside the legal range {}..={}",
                            count, rule.min_starting, rule.max_starting
                        ),
                    ));
                }
                emit(solver, starters(), Relation::Equal, count as f64);
            }
            None if rule.min_starting == rule.max_starting => {
                emit(solver, starters(), Relation::Equal, rule.min_starting as f64);
            }
            None => {
                emit(
                    solver,
                    starters(),
                    Relation::GreaterOrEqual,
                    rule.min_starting as f64,
                );
                emit(
                    solver,
                    starters(),
                    Relation::LessOrEqual,
                    rule.max_starting as f64,
                );
            }
        }
    }

    // Team quotas, teams compared case-insensitively
    let mut teams: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, player) in catalog.iter() {
        teams
            .entry(player.team.trim().to_lowercase())
            .or_default()
            .push(idx.0);
    }
    for (team, members) in &teams {
        let expr = LinearExpr::sum(members.iter().map(|i| vars.squad[*i]));
        if settings.is_banned(team) {
            emit(solver, expr, Relation::Equal, 0.0);
        } else {
            emit(solver, expr, Relation::LessOrEqual, settings.max_from_team as f64);
        }
    }

    // Budget
    let mut spend = LinearExpr::with_capacity(vars.len());
    for (idx, player) in catalog.iter() {
        spend.add_term(settings.price(player.cost, player.sale_value), vars.squad[idx.0]);
    }
    emit(solver, spend, Relation::LessOrEqual, settings.budget);

    // Selections
    let selections = settings.selections;
    for idx in selections
        .locked_in
        .iter()
        .chain(&selections.starting)
        .chain(&selections.bench)
    {
        emit(
            solver,
            LinearExpr::sum([vars.squad[idx.0]]),
            Relation::Equal,
            1.0,
        );
    }
    for idx in &selections.starting {
        emit(
            solver,
            LinearExpr::sum([vars.starting[idx.0]]),
            Relation::Equal,
            1.0,
        );
    }
    for idx in &selections.bench {
        emit(
            solver,
            LinearExpr::sum([vars.starting[idx.0]]),
            Relation::Equal,
            0.0,
        );
    }

    debug!(constraints = added, teams = teams.len(), "period constraints added");
    Ok(added)
}
