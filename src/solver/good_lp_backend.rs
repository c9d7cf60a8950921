//! [`SolverBackend`] backed by `good_lp` with the pure-Rust microlp solver.

use good_lp::{
    microlp, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::{debug, info};

use super::{LinearExpr, Relation, SolveStatus, SolverBackend, VarRef};
use crate::error::{OptimiserError, Result};

/// Buffers the model and hands it to `good_lp` on [`optimize`](SolverBackend::optimize).
#[derive(Debug, Default)]
pub struct GoodLpSolver {
    num_vars: usize,
    constraints: Vec<(LinearExpr, Relation, f64)>,
    objective: LinearExpr,
    /// Set when a variable-free constraint can never hold.
    trivially_infeasible: bool,
    values: Option<Vec<f64>>,
}

impl GoodLpSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    for (var, coefficient) in expr.terms() {
        out.add_mul(*coefficient, handles[var.0]);
    }
    out
}

impl SolverBackend for GoodLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn new_boolean_variable(&mut self) -> VarRef {
        let var = VarRef(self.num_vars);
        self.num_vars += 1;
        var
    }

    fn add_constraint(&mut self, expr: LinearExpr, relation: Relation, bound: f64) {
        // Constants move to the right-hand side.
        let bound = bound - expr.constant();
        if expr.is_constant() {
            if !relation.holds(0.0, bound) {
                debug!(%relation, bound, "constraint without variables can never hold");
                self.trivially_infeasible = true;
            }
            return;
        }
        self.constraints.push((expr, relation, bound));
    }

    fn set_objective(&mut self, expr: LinearExpr) {
        self.objective = expr;
    }

    fn optimize(&mut self) -> Result<SolveStatus> {
        info!(
            solver = self.name(),
            variables = self.num_vars,
            constraints = self.constraints.len(),
            "solving"
        );

        self.values = None;
        if self.trivially_infeasible {
            return Ok(SolveStatus::Infeasible);
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = (0..self.num_vars)
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = to_expression(&self.objective, &handles);
        let mut problem = vars.maximise(objective).using(microlp);
        for (expr, relation, bound) in &self.constraints {
            let lhs = to_expression(expr, &handles);
            let constraint = match relation {
                Relation::LessOrEqual => lhs.leq(*bound),
                Relation::Equal => lhs.eq(*bound),
                Relation::GreaterOrEqual => lhs.geq(*bound),
            };
            problem = problem.with(constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                self.values = Some(handles.iter().map(|v| solution.value(*v)).collect());
                Ok(SolveStatus::Optimal)
            }
            Err(ResolutionError::Infeasible) => Ok(SolveStatus::Infeasible),
            Err(ResolutionError::Unbounded) => Ok(SolveStatus::Unbounded),
            Err(other) => Err(OptimiserError::Solver {
                message: other.to_string(),
            }),
        }
    }

    fn value_of(&self, var: VarRef) -> Result<bool> {
        let values = self.values.as_ref().ok_or_else(|| OptimiserError::Solver {
            message: "no optimal solution available".to_string(),
        })?;
        let value = values.get(var.0).ok_or_else(|| OptimiserError::Internal {
            message: format!("variable {} was never created", var.0),
        })?;
        Ok(*value > 0.5)
    }
}
