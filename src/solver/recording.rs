//! In-memory backend that records the model instead of solving it.
//!
//! Used to unit-test the model builders: inspect emitted constraints,
//! check a hand-built assignment against them, or script a solve outcome.

use std::collections::HashMap;

use super::{LinearExpr, Relation, SolveStatus, SolverBackend, VarRef};
use crate::error::{OptimiserError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub bound: f64,
}

impl RecordedConstraint {
    pub fn is_satisfied_by(&self, assignment: &HashMap<VarRef, bool>) -> bool {
        let lhs = self
            .expr
            .evaluate(|var| f64::from(u8::from(assignment.get(&var).copied().unwrap_or(false))));
        self.relation.holds(lhs, self.bound)
    }
}

#[derive(Debug)]
pub struct RecordingSolver {
    pub num_vars: usize,
    pub constraints: Vec<RecordedConstraint>,
    pub objective: Option<LinearExpr>,
    pub optimize_calls: usize,
    status: SolveStatus,
    assignment: HashMap<VarRef, bool>,
}

impl Default for RecordingSolver {
    fn default() -> Self {
        Self {
            num_vars: 0,
            constraints: Vec::new(),
            objective: None,
            optimize_calls: 0,
            status: SolveStatus::Optimal,
            assignment: HashMap::new(),
        }
    }
}

impl RecordingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the status returned by the next solve.
    pub fn with_status(mut self, status: SolveStatus) -> Self {
        self.status = status;
        self
    }

    /// Script the value a variable reports after solving.
    pub fn set_value(&mut self, var: VarRef, value: bool) {
        self.assignment.insert(var, value);
    }

    /// Constraints violated by an assignment (unlisted variables are 0).
    pub fn violated_by(&self, assignment: &HashMap<VarRef, bool>) -> Vec<&RecordedConstraint> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(assignment))
            .collect()
    }

    /// Constraints that mention the given variable.
    pub fn constraints_on(&self, var: VarRef) -> Vec<&RecordedConstraint> {
        self.constraints
            .iter()
            .filter(|c| c.expr.terms().iter().any(|(v, _)| *v == var))
            .collect()
    }

    /// Objective coefficient of a variable, summed over repeated terms.
    pub fn objective_coefficient(&self, var: VarRef) -> f64 {
        self.objective
            .as_ref()
            .map(|obj| {
                obj.terms()
                    .iter()
                    .filter(|(v, _)| *v == var)
                    .map(|(_, c)| c)
                    .sum()
            })
            .unwrap_or(0.0)
    }
}

impl SolverBackend for RecordingSolver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn new_boolean_variable(&mut self) -> VarRef {
        let var = VarRef(self.num_vars);
        self.num_vars += 1;
        var
    }

    fn add_constraint(&mut self, expr: LinearExpr, relation: Relation, bound: f64) {
        self.constraints.push(RecordedConstraint {
            expr,
            relation,
            bound,
        });
    }

    fn set_objective(&mut self, expr: LinearExpr) {
        self.objective = Some(expr);
    }

    fn optimize(&mut self) -> Result<SolveStatus> {
        self.optimize_calls += 1;
        Ok(self.status)
    }

    fn value_of(&self, var: VarRef) -> Result<bool> {
        if var.0 >= self.num_vars {
            return Err(OptimiserError::Internal {
                message: format!("variable {} was never created", var.0),
            });
        }
        Ok(self.assignment.get(&var).copied().unwrap_or(false))
    }
}
