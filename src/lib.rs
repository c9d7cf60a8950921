//! Fantasy Premier League Squad Optimiser
//!
//! Picks the squad, starting eleven and captain that maximise projected
//! points over one or more gameweeks, subject to the FPL squad rules, a
//! budget, team limits and transfer limits. The model is a 0/1 integer
//! program handed to a pluggable [`SolverBackend`]; [`GoodLpSolver`] is the
//! bundled implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fpl_optimiser::{load_catalog, optimise, GoodLpSolver, OptimiserConfig};
//! use std::path::Path;
//!
//! # fn example() -> fpl_optimiser::Result<()> {
//! let catalog = load_catalog(Path::new("projections.csv"))?;
//! let config = OptimiserConfig {
//!     budget: Some(100.0),
//!     num_periods: 3,
//!     ..OptimiserConfig::default()
//! };
//!
//! let plan = optimise(&catalog, &config, &mut GoodLpSolver::new())?;
//! println!("{}", fpl_optimiser::report::render_plan(&plan));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your FPL entry ID to avoid passing it in every command:
//! ```bash
//! export FPL_ENTRY_ID=123456
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fpl;
pub mod model;
pub mod optimiser;
pub mod report;
pub mod solver;

// Re-export commonly used types
pub use catalog::{load_catalog, read_catalog, Catalog, Player};
pub use cli::types::{EntryId, Gameweek, Identifier, PlayerId, Position};
pub use config::{CurrentSquad, OptimiserConfig, PriceBasis, SquadRules};
pub use error::{OptimiserError, Result};
pub use model::RosterPlan;
pub use optimiser::optimise;
pub use solver::{GoodLpSolver, SolverBackend};

pub const ENTRY_ID_ENV_VAR: &str = "FPL_ENTRY_ID";
