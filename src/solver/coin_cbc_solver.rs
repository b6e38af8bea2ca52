use crate::domain::{
    engine::{CheckResult, ConstraintEngine, Result, SolverError},
    models::{Assignment, ConstraintModel},
    value_objects::ConstraintType,
};
use crate::solver::linearize::LinearProgram;
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;
use tracing::debug;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintEngine for CoinCbcSolver {
    fn check(&self, model: &ConstraintModel) -> Result<CheckResult> {
        let start_time = Instant::now();
        let program = LinearProgram::from_model(model);
        if program.trivially_infeasible {
            return Ok(CheckResult::Unsatisfiable);
        }

        let mut vars = variables!();
        let columns: Vec<GoodLpVariable> = program
            .columns
            .iter()
            .map(|c| vars.add(variable().integer().min(c.lower).max(c.upper)))
            .collect();

        // Pure feasibility: constant objective
        let objective: Expression = 0.into();
        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);

        for row in &program.rows {
            let mut lhs: Expression = 0.into();
            for &(col, coeff) in &row.terms {
                lhs += coeff * columns[col];
            }

            lp_model = match row.constraint_type {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(row.bound)),
                ConstraintType::Equal => lp_model.with(lhs.eq(row.bound)),
                ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(row.bound)),
            };
        }

        let solution_result = lp_model.solve();
        debug!(
            engine = self.name(),
            columns = program.columns.len(),
            rows = program.rows.len(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "check finished"
        );

        match solution_result {
            Ok(sol) => {
                let values: Vec<i64> = columns[..program.num_model_variables]
                    .iter()
                    .map(|&var| sol.value(var).round() as i64)
                    .collect();
                if !model.is_satisfied_by(&values) {
                    return Err(SolverError::ExecutionFailed(
                        "CBC returned an assignment that violates the model".to_string(),
                    ));
                }
                Ok(CheckResult::Satisfiable(Assignment::new(values)))
            }
            Err(ResolutionError::Infeasible) => Ok(CheckResult::Unsatisfiable),
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
