//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{EntryId, Identifier};

use crate::config::PriceBasis;

/// Where the current squad comes from, shared by both commands.
#[derive(Debug, Args)]
pub struct SquadSource {
    /// FPL entry ID to read the current squad from (or set `FPL_ENTRY_ID` env var).
    #[clap(long, short)]
    pub entry: Option<EntryId>,

    /// Force refresh of cached picks from the FPL API.
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Debug, Args)]
pub struct OptimiseArgs {
    /// Projection CSV: id, name, team, position, cost, sale_value and `<gw>_pts` columns.
    #[clap(long, short)]
    pub data: PathBuf,

    /// JSON file with an optimiser config; flags below override its values.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Number of gameweeks to plan for.
    #[clap(long, short = 'n')]
    pub periods: Option<usize>,

    /// Budget in millions; derived from the current squad when omitted.
    #[clap(long, short)]
    pub budget: Option<f64>,

    /// Free transfers available before the first planned gameweek.
    #[clap(long)]
    pub free_transfers: Option<u32>,

    /// Ignore the current squad when picking the first gameweek.
    #[clap(long)]
    pub wildcard: bool,

    /// Weight of bench points, between 0 and 1.
    #[clap(long)]
    pub bench_strength: Option<f64>,

    /// Per-gameweek discount applied to later projections, between 0 and 1.
    #[clap(long)]
    pub discount: Option<f64>,

    /// Maximum players from any one team.
    #[clap(long)]
    pub max_from_team: Option<usize>,

    /// Team to exclude entirely (repeatable): `--ban Arsenal --ban Spurs`.
    #[clap(long = "ban")]
    pub banned_teams: Vec<String>,

    /// Player that must be in the squad, by id or name (repeatable).
    #[clap(long = "in")]
    pub locked_in: Vec<Identifier>,

    /// Player that must not be selected, by id or name (repeatable).
    #[clap(long = "out")]
    pub excluded: Vec<Identifier>,

    /// Player that must start (repeatable).
    #[clap(long = "start")]
    pub starting: Vec<Identifier>,

    /// Player that must be on the bench (repeatable).
    #[clap(long = "bench")]
    pub bench: Vec<Identifier>,

    /// Exact number of starting defenders.
    #[clap(long)]
    pub def: Option<usize>,

    /// Exact number of starting midfielders.
    #[clap(long)]
    pub mid: Option<usize>,

    /// Exact number of starting forwards.
    #[clap(long)]
    pub fwd: Option<usize>,

    /// Which price counts against the budget.
    #[clap(long, value_enum)]
    pub price_basis: Option<PriceBasis>,

    #[clap(flatten)]
    pub source: SquadSource,

    /// Current squad given directly as player ids, instead of fetching picks.
    #[clap(long = "squad", value_delimiter = ',', conflicts_with = "entry")]
    pub squad: Vec<Identifier>,

    /// Money in the bank, used with `--squad`.
    #[clap(long, requires = "squad")]
    pub bank: Option<f64>,

    /// Output the plan as JSON instead of text.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick the best squad, line-up and captain over the planning horizon.
    Optimise(OptimiseArgs),

    /// Show the squad an FPL manager currently holds.
    CurrentSquad {
        #[clap(flatten)]
        source: SquadSource,

        /// Projection CSV used to name the players and show their projections.
        #[clap(long, short)]
        data: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "fpl-opt", about = "Fantasy Premier League squad optimiser", version)]
pub struct FplOpt {
    /// Log debug output (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
