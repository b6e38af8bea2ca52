// HiGHS adapter
// Decides the linearized model as an integer feasibility problem

use crate::domain::{
    engine::{CheckResult, ConstraintEngine, Result, SolverError},
    models::{Assignment, ConstraintModel},
    value_objects::ConstraintType,
};
use crate::solver::linearize::LinearProgram;
use std::time::Instant;
use tracing::debug;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintEngine for HighsSolver {
    fn check(&self, model: &ConstraintModel) -> Result<CheckResult> {
        use highs::{HighsModelStatus, RowProblem, Sense};

        let start_time = Instant::now();
        let program = LinearProgram::from_model(model);
        if program.trivially_infeasible {
            return Ok(CheckResult::Unsatisfiable);
        }

        let mut pb = RowProblem::default();
        let cols: Vec<_> = program
            .columns
            .iter()
            .map(|c| pb.add_integer_column(0.0, c.lower..=c.upper))
            .collect();

        for row in &program.rows {
            let terms: Vec<_> = row.terms.iter().map(|&(i, coeff)| (cols[i], coeff)).collect();
            match row.constraint_type {
                ConstraintType::LessThanOrEqual => pb.add_row(..=row.bound, &terms),
                ConstraintType::Equal => pb.add_row(row.bound..=row.bound, &terms),
                ConstraintType::GreaterThanOrEqual => pb.add_row(row.bound.., &terms),
            }
        }

        let mut highs_model = pb.optimise(Sense::Minimise);
        highs_model.set_option("output_flag", false);
        let solved = highs_model.solve();

        debug!(
            engine = self.name(),
            columns = program.columns.len(),
            rows = program.rows.len(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            status = ?solved.status(),
            "check finished"
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let values: Vec<i64> = solution.columns()[..program.num_model_variables]
                    .iter()
                    .map(|v| v.round() as i64)
                    .collect();
                if !model.is_satisfied_by(&values) {
                    return Err(SolverError::ExecutionFailed(
                        "HiGHS returned an assignment that violates the model".to_string(),
                    ));
                }
                Ok(CheckResult::Satisfiable(Assignment::new(values)))
            }
            // A constant objective cannot be unbounded
            HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(CheckResult::Unsatisfiable)
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
