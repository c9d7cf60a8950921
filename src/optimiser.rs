//! Entry point for a single optimisation run.
//!
//! Builds the whole multi-gameweek model, solves it once and decodes the
//! result. Parameter and resolution errors surface before any variable is
//! created; solver failures surface as a single terminal error.

use tracing::{debug, info};

use crate::catalog::{Catalog, Player};
use crate::config::OptimiserConfig;
use crate::error::{OptimiserError, Result};
use crate::model::{
    add_continuity, add_initial_squad_constraint, add_period_constraints, compose_objective,
    decode_plan, PeriodSettings, PeriodVars, RosterPlan, Selections,
};
use crate::solver::{SolveStatus, SolverBackend};

/// Optimise a squad plan over `config.num_periods` gameweeks.
///
/// # Examples
///
/// ```rust
/// use fpl_optimiser::{optimise, read_catalog, GoodLpSolver, OptimiserConfig, SquadRules};
/// use fpl_optimiser::config::PositionRule;
/// use fpl_optimiser::Position;
///
/// let csv = "id,team,pos,name,cost,1_pts\n\
///            1,A,G,Keeper,4,2\n\
///            2,B,D,Back,4,5\n\
///            3,C,M,Middle,4,6\n\
///            4,D,F,Striker,4,8\n";
/// let catalog = read_catalog(csv.as_bytes()).unwrap();
///
/// let config = OptimiserConfig {
///     budget: Some(20.0),
///     squad_rules: SquadRules {
///         squad_size: 4,
///         starting_size: 4,
///         max_transfers_per_period: 1,
///         positions: [
///             PositionRule::new(Position::GK, 1, 1, 1),
///             PositionRule::new(Position::DEF, 1, 1, 1),
///             PositionRule::new(Position::MID, 1, 1, 1),
///             PositionRule::new(Position::FWD, 1, 1, 1),
///         ],
///     },
///     ..OptimiserConfig::default()
/// };
///
/// let plan = optimise(&catalog, &config, &mut GoodLpSolver::new()).unwrap();
/// assert_eq!(plan.total_starting_points, 29.0);
/// ```
pub fn optimise<S: SolverBackend + ?Sized>(
    catalog: &Catalog,
    config: &OptimiserConfig,
    solver: &mut S,
) -> Result<RosterPlan> {
    config.validate(catalog)?;

    // The current squad resolves against the unfiltered catalog so that an
    // excluded player still counts as one who has to be sold.
    let current: Option<Vec<Player>> = match &config.current_squad {
        Some(squad) => Some(
            catalog
                .resolve_all(&squad.players)?
                .into_iter()
                .map(|idx| catalog.get(idx).clone())
                .collect(),
        ),
        None => None,
    };

    let budget = match (config.budget, &config.current_squad, &current) {
        (Some(budget), _, _) => budget,
        (None, Some(squad), Some(players)) => {
            players.iter().map(|p| p.sale_value).sum::<f64>() + squad.bank
        }
        _ => return Err(OptimiserError::invalid("budget", "required when no current squad is given")),
    };

    let excluded = catalog.resolve_all(&config.excluded)?;
    let pool = catalog.without(&excluded);
    let selections = Selections {
        locked_in: pool.resolve_all(&config.locked_in)?,
        starting: pool.resolve_all(&config.starting_pinned)?,
        bench: pool.resolve_all(&config.bench_pinned)?,
    };

    info!(
        candidates = pool.len(),
        excluded = excluded.len(),
        periods = config.num_periods,
        budget,
        "building squad model"
    );

    let periods: Vec<PeriodVars> = (0..config.num_periods)
        .map(|_| PeriodVars::new(&mut *solver, pool.len()))
        .collect();

    let period_settings = PeriodSettings {
        rules: &config.squad_rules,
        starting_counts: config.starting_counts,
        max_from_team: config.max_from_team,
        banned_teams: &config.banned_teams,
        budget,
        price_basis: config.price_basis,
        selections: &selections,
    };
    for (p, vars) in periods.iter().enumerate() {
        let added = add_period_constraints(solver, &pool, vars, &period_settings)?;
        debug!(period = p, constraints = added, "period built");
    }

    if let (false, Some(players)) = (config.wildcard, &current) {
        let kept: Vec<_> = players.iter().filter_map(|p| pool.index_of(p.id)).collect();
        add_initial_squad_constraint(
            solver,
            &periods[0],
            &kept,
            &config.squad_rules,
            config.free_transfers,
        );
    }

    add_continuity(solver, &periods, &config.squad_rules, config.free_transfers);

    let objective = compose_objective(
        &pool,
        &periods,
        config.bench_strength,
        config.future_discount,
    )?;
    solver.set_objective(objective);

    match solver.optimize()? {
        SolveStatus::Optimal => {
            info!(solver = solver.name(), "optimal solution found");
            decode_plan(
                solver,
                &pool,
                &periods,
                &config.squad_rules,
                config.price_basis,
                budget,
                current.as_deref().zip(config.current_squad.as_ref().map(|s| s.bank)),
            )
        }
        SolveStatus::Infeasible => Err(OptimiserError::Infeasible),
        SolveStatus::Unbounded => Err(OptimiserError::Unbounded),
    }
}
