// Engine contract: anything that can decide a ConstraintModel
// Concrete engines live in the solver module and are chosen by SolverFactory

use super::models::{Assignment, ConstraintModel, VarId};
use super::value_objects::CheckStatus;

/// Error types for the engine layer
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Answer of a single satisfiability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Satisfiable(Assignment),
    Unsatisfiable,
    /// The step budget ran out before the engine could decide
    Exhausted { steps: u64 },
}

impl CheckResult {
    pub fn status(&self) -> CheckStatus {
        match self {
            CheckResult::Satisfiable(_) => CheckStatus::Satisfiable,
            CheckResult::Unsatisfiable => CheckStatus::Unsatisfiable,
            CheckResult::Exhausted { .. } => CheckStatus::Exhausted,
        }
    }
}

/// Contract every constraint engine follows.
///
/// Engines are stateless between calls: each `check` receives the full
/// accumulated model.
pub trait ConstraintEngine: Send + Sync {
    /// Find any assignment satisfying every constraint of `model`
    fn check(&self, model: &ConstraintModel) -> Result<CheckResult>;

    /// Validate a model without solving it
    fn validate(&self, model: &ConstraintModel) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = model.num_variables();

        for (i, var) in model.variables.iter().enumerate() {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                    i, var.name, var.lower_bound, var.upper_bound
                ));
            }
            if var.is_binary() && (var.lower_bound < 0 || var.upper_bound > 1) {
                errors.push(format!(
                    "Binary variable {} '{}' has bounds outside [0, 1]",
                    i, var.name
                ));
            }
        }

        for (i, constraint) in model.constraints.iter().enumerate() {
            let mut unknown: Option<VarId> = None;
            constraint.formula.for_each_var(&mut |v| {
                if v.index() >= num_vars && unknown.is_none() {
                    unknown = Some(v);
                }
            });
            if let Some(v) = unknown {
                errors.push(format!(
                    "Constraint {} '{}' references undeclared variable {} (model has {})",
                    i, constraint.name, v, num_vars
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this engine
    fn name(&self) -> &str;

    /// Whether the engine honours a step budget and can report `Exhausted`
    fn supports_step_limit(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Formula, Variable};

    struct NullEngine;

    impl ConstraintEngine for NullEngine {
        fn check(&self, _model: &ConstraintModel) -> Result<CheckResult> {
            Ok(CheckResult::Unsatisfiable)
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let mut model = ConstraintModel::new();
        model.add_variable(Variable::integer("q").with_bounds(3, 1));
        let err = NullEngine.validate(&model).unwrap_err();
        assert!(err.to_string().contains("lower bound (3) > upper bound (1)"));
    }

    #[test]
    fn validate_rejects_undeclared_variable() {
        let mut model = ConstraintModel::new();
        model.add_variable(Variable::binary("pos_Fe"));
        model.add_constraint(Constraint::new(Formula::Var(VarId(7))).with_name("dangling"));
        let err = NullEngine.validate(&model).unwrap_err();
        assert!(matches!(err, SolverError::InvalidProblem(msg) if msg.contains("dangling")));
    }

    #[test]
    fn validate_accepts_well_formed_model() {
        let mut model = ConstraintModel::new();
        let flag = model.add_variable(Variable::binary("neg_O"));
        model.add_constraint(Constraint::new(Formula::Var(flag)));
        assert!(NullEngine.validate(&model).is_ok());
        assert_eq!(CheckResult::Unsatisfiable.status(), CheckStatus::Unsatisfiable);
    }
}
