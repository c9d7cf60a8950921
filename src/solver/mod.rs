//! Solver port for the squad model.
//!
//! The model builders only ever talk to [`SolverBackend`]: create boolean
//! variables, add linear constraints, set a maximisation objective, solve
//! once and read the 0/1 assignment back. Any integer-programming backend
//! can be slotted in without touching constraint construction.

pub mod good_lp_backend;
#[cfg(any(test, feature = "test-utils"))]
pub mod recording;

use std::fmt;

use serde::Serialize;

use crate::error::Result;

pub use good_lp_backend::GoodLpSolver;
#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingSolver;

/// Handle to a boolean decision variable owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarRef(pub usize);

/// Comparison between a linear expression and its constant bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl Relation {
    /// Whether `lhs <relation> rhs` holds, with a small tolerance.
    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        const EPS: f64 = 1e-9;
        match self {
            Relation::LessOrEqual => lhs <= rhs + EPS,
            Relation::Equal => (lhs - rhs).abs() <= EPS,
            Relation::GreaterOrEqual => lhs + EPS >= rhs,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::LessOrEqual => "<=",
            Relation::Equal => "==",
            Relation::GreaterOrEqual => ">=",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

/// Sum of `coefficient * variable` terms plus a constant.
///
/// Terms on the same variable are not merged; backends sum them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarRef, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            constant: 0.0,
        }
    }

    /// Unit-coefficient sum of the given variables.
    pub fn sum<I: IntoIterator<Item = VarRef>>(vars: I) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(1.0, var);
        }
        expr
    }

    pub fn add_term(&mut self, coefficient: f64, var: VarRef) -> &mut Self {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
        self
    }

    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    pub fn terms(&self) -> &[(VarRef, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate against a variable assignment.
    pub fn evaluate<F: Fn(VarRef) -> f64>(&self, value_of: F) -> f64 {
        self.terms
            .iter()
            .map(|(var, coefficient)| coefficient * value_of(*var))
            .sum::<f64>()
            + self.constant
    }
}

/// Narrow capability interface over an external integer-programming solver.
///
/// A backend is used for exactly one model: variables are created, the
/// model is filled, [`optimize`](SolverBackend::optimize) is called once and
/// values are read back.
pub trait SolverBackend {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Create a new variable restricted to {0, 1}.
    fn new_boolean_variable(&mut self) -> VarRef;

    /// Add `expr <relation> bound`.
    fn add_constraint(&mut self, expr: LinearExpr, relation: Relation, bound: f64);

    /// Set the objective to maximise.
    fn set_objective(&mut self, expr: LinearExpr);

    /// Solve the model. Blocks until the backend finishes.
    fn optimize(&mut self) -> Result<SolveStatus>;

    /// Value of a variable in the optimal assignment.
    fn value_of(&self, var: VarRef) -> Result<bool>;
}
