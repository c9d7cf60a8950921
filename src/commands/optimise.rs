//! The `optimise` command: flags and config file in, plan out.

use tracing::{info, warn};

use crate::{
    catalog::load_catalog,
    cli::OptimiseArgs,
    commands::resolve_entry_id,
    config::{CurrentSquad, OptimiserConfig},
    fpl::fetch_current_picks,
    optimiser::optimise,
    report::render_plan,
    solver::GoodLpSolver,
    Result,
};

/// Merge the optional config file with command-line overrides.
///
/// Scalar flags replace config values; list flags extend them.
pub fn build_config(args: &OptimiseArgs) -> Result<OptimiserConfig> {
    let mut config = match &args.config {
        Some(path) => OptimiserConfig::from_json_file(path)?,
        None => OptimiserConfig::default(),
    };

    if let Some(periods) = args.periods {
        config.num_periods = periods;
    }
    if args.budget.is_some() {
        config.budget = args.budget;
    }
    if let Some(free_transfers) = args.free_transfers {
        config.free_transfers = free_transfers;
    }
    config.wildcard |= args.wildcard;
    if let Some(bench_strength) = args.bench_strength {
        config.bench_strength = bench_strength;
    }
    if let Some(discount) = args.discount {
        config.future_discount = discount;
    }
    if let Some(max_from_team) = args.max_from_team {
        config.max_from_team = max_from_team;
    }
    if let Some(price_basis) = args.price_basis {
        config.price_basis = price_basis;
    }

    config.banned_teams.extend(args.banned_teams.iter().cloned());
    config.locked_in.extend(args.locked_in.iter().cloned());
    config.excluded.extend(args.excluded.iter().cloned());
    config.starting_pinned.extend(args.starting.iter().cloned());
    config.bench_pinned.extend(args.bench.iter().cloned());

    if args.def.is_some() {
        config.starting_counts.def = args.def;
    }
    if args.mid.is_some() {
        config.starting_counts.mid = args.mid;
    }
    if args.fwd.is_some() {
        config.starting_counts.fwd = args.fwd;
    }

    if !args.squad.is_empty() {
        config.current_squad = Some(CurrentSquad {
            players: args.squad.clone(),
            bank: args.bank.unwrap_or(0.0),
        });
    }

    Ok(config)
}

/// Handle the optimise command
pub async fn handle_optimise(args: OptimiseArgs) -> Result<()> {
    let catalog = load_catalog(&args.data)?;
    let mut config = build_config(&args)?;

    if config.current_squad.is_none() {
        // An entry is optional here: without one the run needs a budget.
        if let Ok(entry) = resolve_entry_id(args.source.entry) {
            let (next, picks) = fetch_current_picks(entry, args.source.refresh).await?;
            if next != catalog.first_gameweek() {
                warn!(
                    next_deadline = %next,
                    catalog_start = %catalog.first_gameweek(),
                    "projections do not start at the next gameweek"
                );
            }
            info!(%entry, players = picks.picks.len(), bank = picks.bank(), "loaded current squad");
            config.current_squad = Some(picks.current_squad());
        }
    }

    let mut solver = GoodLpSolver::new();
    let plan = optimise(&catalog, &config, &mut solver)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?); // tarpaulin::skip
    } else {
        print!("{}", render_plan(&plan)); // tarpaulin::skip
    }

    Ok(())
}
