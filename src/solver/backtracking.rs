// Backtracking engine
// Depth-first search over the finite domains declared in the model, pruned by
// three-valued evaluation of every constraint touching the last assigned variable

use crate::domain::{
    engine::{CheckResult, ConstraintEngine, Result, SolverError},
    models::{Assignment, ConstraintModel, Formula, LinearConstraint, VarId},
    value_objects::ConstraintType,
};
use std::time::Instant;
use tracing::debug;

/// Pure-Rust engine for small bounded integer models.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    step_limit: Option<u64>,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self { step_limit: None }
    }

    /// Give up with [`CheckResult::Exhausted`] after `limit` branching steps per check.
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
        }
    }
}

impl ConstraintEngine for BacktrackingSolver {
    fn check(&self, model: &ConstraintModel) -> Result<CheckResult> {
        let start_time = Instant::now();
        let mut search = Search::new(model, self.step_limit);

        let result = if !search.presolve() {
            CheckResult::Unsatisfiable
        } else {
            match search.run() {
                Step::Found => {
                    let values: Vec<i64> = search
                        .values
                        .iter()
                        .zip(&search.lower)
                        .map(|(v, &lo)| v.unwrap_or(lo))
                        .collect();
                    if !model.is_satisfied_by(&values) {
                        return Err(SolverError::ExecutionFailed(
                            "search produced an assignment that violates the model".to_string(),
                        ));
                    }
                    CheckResult::Satisfiable(Assignment::new(values))
                }
                Step::Failed => CheckResult::Unsatisfiable,
                Step::OutOfSteps => CheckResult::Exhausted {
                    steps: search.steps,
                },
            }
        };

        debug!(
            engine = self.name(),
            steps = search.steps,
            constraints = model.num_constraints(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            status = %result.status(),
            "check finished"
        );
        Ok(result)
    }

    fn name(&self) -> &str {
        "Backtracking"
    }

    fn supports_step_limit(&self) -> bool {
        true
    }
}

enum Step {
    Found,
    Failed,
    OutOfSteps,
}

struct Search<'m> {
    model: &'m ConstraintModel,
    lower: Vec<i64>,
    upper: Vec<i64>,
    values: Vec<Option<i64>>,
    /// Constraint indices mentioning each variable.
    watchers: Vec<Vec<usize>>,
    order: Vec<usize>,
    steps: u64,
    step_limit: Option<u64>,
}

impl<'m> Search<'m> {
    fn new(model: &'m ConstraintModel, step_limit: Option<u64>) -> Self {
        let n = model.num_variables();
        let mut watchers = vec![Vec::new(); n];
        for (index, constraint) in model.constraints.iter().enumerate() {
            constraint.formula.for_each_var(&mut |v| {
                let list = &mut watchers[v.index()];
                if list.last() != Some(&index) {
                    list.push(index);
                }
            });
        }

        Self {
            model,
            lower: model.variables.iter().map(|v| v.lower_bound).collect(),
            upper: model.variables.iter().map(|v| v.upper_bound).collect(),
            values: vec![None; n],
            watchers,
            order: Vec::with_capacity(n),
            steps: 0,
            step_limit,
        }
    }

    /// Tightens bounds from top-level unit constraints; false when a domain empties.
    fn presolve(&mut self) -> bool {
        let model = self.model;
        for constraint in &model.constraints {
            tighten(&constraint.formula, &mut self.lower, &mut self.upper);
        }
        if self.lower.iter().zip(&self.upper).any(|(lo, hi)| lo > hi) {
            return false;
        }

        // Fixed variables first, then declaration order
        let mut order: Vec<usize> = (0..self.lower.len()).collect();
        order.sort_by_key(|&i| (self.lower[i] != self.upper[i], i));
        self.order = order;

        model
            .constraints
            .iter()
            .all(|c| self.evaluate(&c.formula) != Some(false))
    }

    fn run(&mut self) -> Step {
        self.descend(0)
    }

    fn descend(&mut self, depth: usize) -> Step {
        let Some(&var) = self.order.get(depth) else {
            return Step::Found;
        };

        for value in self.lower[var]..=self.upper[var] {
            self.steps += 1;
            if self.step_limit.is_some_and(|limit| self.steps > limit) {
                return Step::OutOfSteps;
            }

            self.values[var] = Some(value);
            if self.consistent(var) {
                match self.descend(depth + 1) {
                    Step::Failed => {}
                    outcome => return outcome,
                }
            }
        }

        self.values[var] = None;
        Step::Failed
    }

    fn consistent(&self, var: usize) -> bool {
        self.watchers[var]
            .iter()
            .all(|&c| self.evaluate(&self.model.constraints[c].formula) != Some(false))
    }

    fn bounds(&self, var: VarId) -> (i64, i64) {
        let i = var.index();
        match self.values[i] {
            Some(x) => (x, x),
            None => (self.lower[i], self.upper[i]),
        }
    }

    /// Three-valued evaluation: `None` when the partial assignment does not decide it.
    fn evaluate(&self, formula: &Formula) -> Option<bool> {
        match formula {
            Formula::Const(b) => Some(*b),
            Formula::Atom(c) => self.evaluate_atom(c),
            Formula::Var(v) => match self.bounds(*v) {
                (lo, _) if lo >= 1 => Some(true),
                (_, hi) if hi <= 0 => Some(false),
                _ => None,
            },
            Formula::Not(f) => self.evaluate(f).map(|b| !b),
            Formula::And(fs) => {
                let mut decided = true;
                for f in fs {
                    match self.evaluate(f) {
                        Some(false) => return Some(false),
                        None => decided = false,
                        Some(true) => {}
                    }
                }
                decided.then_some(true)
            }
            Formula::Or(fs) => {
                let mut decided = true;
                for f in fs {
                    match self.evaluate(f) {
                        Some(true) => return Some(true),
                        None => decided = false,
                        Some(false) => {}
                    }
                }
                decided.then_some(false)
            }
            Formula::Implies(p, c) => match (self.evaluate(p), self.evaluate(c)) {
                (Some(false), _) | (_, Some(true)) => Some(true),
                (Some(true), Some(false)) => Some(false),
                _ => None,
            },
        }
    }

    fn evaluate_atom(&self, constraint: &LinearConstraint) -> Option<bool> {
        let (lo, hi) = constraint.expr.range(|v| self.bounds(v));
        let b = constraint.bound;
        match constraint.constraint_type {
            ConstraintType::LessThanOrEqual if hi <= b => Some(true),
            ConstraintType::LessThanOrEqual if lo > b => Some(false),
            ConstraintType::GreaterThanOrEqual if lo >= b => Some(true),
            ConstraintType::GreaterThanOrEqual if hi < b => Some(false),
            ConstraintType::Equal if lo == b && hi == b => Some(true),
            ConstraintType::Equal if b < lo || b > hi => Some(false),
            _ => None,
        }
    }
}

/// Applies top-level conjuncts of the form `c·x + k (op) b` and `[¬]flag` to the bounds.
fn tighten(formula: &Formula, lower: &mut [i64], upper: &mut [i64]) {
    match formula {
        Formula::And(fs) => fs.iter().for_each(|f| tighten(f, lower, upper)),
        Formula::Var(v) => lower[v.index()] = lower[v.index()].max(1),
        Formula::Not(inner) => {
            if let Formula::Var(v) = inner.as_ref() {
                upper[v.index()] = upper[v.index()].min(0);
            }
        }
        Formula::Atom(c) if c.expr.terms.len() == 1 => {
            let (var, coef) = c.expr.terms[0];
            let i = var.index();
            let rhs = c.bound - c.expr.constant;
            let at_most = |lower: &mut [i64], upper: &mut [i64]| {
                // coef·x ≤ rhs
                if coef > 0 {
                    upper[i] = upper[i].min(div_floor(rhs, coef));
                } else {
                    lower[i] = lower[i].max(div_ceil(rhs, coef));
                }
            };
            let at_least = |lower: &mut [i64], upper: &mut [i64]| {
                // coef·x ≥ rhs
                if coef > 0 {
                    lower[i] = lower[i].max(div_ceil(rhs, coef));
                } else {
                    upper[i] = upper[i].min(div_floor(rhs, coef));
                }
            };
            match c.constraint_type {
                ConstraintType::LessThanOrEqual => at_most(lower, upper),
                ConstraintType::GreaterThanOrEqual => at_least(lower, upper),
                ConstraintType::Equal => {
                    at_most(lower, upper);
                    at_least(lower, upper);
                }
            }
        }
        _ => {}
    }
}

fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) == (b < 0)) {
        q + 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, LinearExpr, Variable};

    fn two_var_model(total: i64) -> (ConstraintModel, VarId, VarId) {
        let mut model = ConstraintModel::new();
        let x = model.add_variable(Variable::integer("x").with_bounds(0, 10));
        let y = model.add_variable(Variable::integer("y").with_bounds(0, 10));
        model.add_constraint(Constraint::new(LinearExpr::sum([x, y]).equals(total)));
        (model, x, y)
    }

    #[test]
    fn finds_smallest_first_assignment() {
        let (mut model, x, y) = two_var_model(7);
        model.add_constraint(Constraint::new(
            LinearExpr::new().with_term(x, 2).with_term(y, -1).equals(2),
        ));
        let CheckResult::Satisfiable(assignment) = BacktrackingSolver::new().check(&model).unwrap()
        else {
            panic!("expected a solution");
        };
        assert_eq!((assignment.value(x), assignment.value(y)), (3, 4));
    }

    #[test]
    fn reports_unsatisfiable() {
        let (mut model, x, _) = two_var_model(3);
        model.add_constraint(Constraint::new(LinearExpr::var(x).geq(5)));
        assert_eq!(
            BacktrackingSolver::new().check(&model).unwrap(),
            CheckResult::Unsatisfiable
        );
    }

    #[test]
    fn presolve_detects_indivisible_equality() {
        let mut model = ConstraintModel::new();
        let x = model.add_variable(Variable::integer("x").with_bounds(0, 10));
        model.add_constraint(Constraint::new(LinearExpr::new().with_term(x, 2).equals(5)));
        assert_eq!(
            BacktrackingSolver::new().check(&model).unwrap(),
            CheckResult::Unsatisfiable
        );
    }

    #[test]
    fn honours_implications_between_flags() {
        let mut model = ConstraintModel::new();
        let q = model.add_variable(Variable::integer("q").with_bounds(0, 3));
        let flag = model.add_variable(Variable::binary("flag"));
        model.add_constraint(Constraint::new(Formula::implies(
            LinearExpr::var(q).geq(1).into(),
            Formula::Var(flag),
        )));
        model.add_constraint(Constraint::new(Formula::not(Formula::Var(flag))));
        model.add_constraint(Constraint::new(LinearExpr::var(q).geq(0)));

        let CheckResult::Satisfiable(assignment) = BacktrackingSolver::new().check(&model).unwrap()
        else {
            panic!("expected a solution");
        };
        assert_eq!(assignment.value(q), 0);
        assert!(!assignment.is_true(flag));
    }

    #[test]
    fn step_limit_reports_exhaustion() {
        let mut model = ConstraintModel::new();
        let vars: Vec<VarId> = (0..6)
            .map(|i| model.add_variable(Variable::integer(format!("x{i}")).with_bounds(0, 9)))
            .collect();
        model.add_constraint(Constraint::new(LinearExpr::sum(vars.iter().copied()).equals(53)));

        let result = BacktrackingSolver::with_step_limit(5).check(&model).unwrap();
        assert!(matches!(result, CheckResult::Exhausted { steps } if steps > 5));
    }

    #[test]
    fn division_helpers_round_toward_infinities() {
        assert_eq!(div_floor(7, 2), 3);
        assert_eq!(div_floor(-7, 2), -4);
        assert_eq!(div_ceil(7, 2), 4);
        assert_eq!(div_ceil(-3, -2), 2);
        assert_eq!(div_floor(0, -1), 0);
    }
}
