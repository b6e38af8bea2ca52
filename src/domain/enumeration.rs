// Solution enumeration: solve, record, exclude the solution and its multiples, repeat
// Stops on unsatisfiable, on max_results, or when the engine exhausts its step budget

use std::fmt;

use tracing::{debug, info, warn};

use super::charge_model::ChargeModel;
use super::engine::{CheckResult, ConstraintEngine, SolverError};
use super::error::{Error, Result};
use super::models::Constraint;
use super::species::{Compound, IonId};
use crate::solver::BacktrackingSolver;

/// Default bound on the number of enumerated solutions.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Quantity of every candidate ion in one formula unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeSolution {
    entries: Vec<(IonId, u32)>,
}

impl ChargeSolution {
    pub fn new(entries: Vec<(IonId, u32)>) -> Self {
        Self { entries }
    }

    /// Quantity of `id`, or `None` if it was not a candidate ion.
    pub fn quantity(&self, id: &IonId) -> Option<u32> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|&(_, n)| n)
    }

    /// All candidate ions in candidate order, zero quantities included.
    pub fn iter(&self) -> impl Iterator<Item = (&IonId, u32)> {
        self.entries.iter().map(|(id, n)| (id, *n))
    }

    /// Ions present in the formula unit.
    pub fn nonzero(&self) -> impl Iterator<Item = (&IonId, u32)> {
        self.iter().filter(|&(_, n)| n > 0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn quantities(&self) -> Vec<u32> {
        self.entries.iter().map(|&(_, n)| n).collect()
    }
}

impl fmt::Display for ChargeSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, n)) in self.nonzero().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}: {n}")?;
        }
        Ok(())
    }
}

/// Result of one enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeSolutions {
    /// Distinct solutions in the order the engine found them.
    pub solutions: Vec<ChargeSolution>,
    /// `max_results` was reached and at least one more solution exists.
    pub truncated: bool,
    /// The engine's step budget ran out; more solutions may exist.
    pub exhausted: bool,
}

impl ChargeSolutions {
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChargeSolution> {
        self.solutions.iter()
    }
}

impl<'a> IntoIterator for &'a ChargeSolutions {
    type Item = &'a ChargeSolution;
    type IntoIter = std::slice::Iter<'a, ChargeSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

/// Charge-balance solver for one compound.
///
/// Owns its compound, its constraint model and its engine; nothing is
/// shared between instances.
pub struct ChargeBalanceSolver {
    compound: Compound,
    charge: ChargeModel,
    engine: Box<dyn ConstraintEngine>,
    multiplier_bound: u32,
}

impl ChargeBalanceSolver {
    /// Builds the model and uses the default backtracking engine.
    pub fn new(compound: Compound) -> Self {
        Self::with_engine(compound, Box::new(BacktrackingSolver::new()))
    }

    pub fn with_engine(compound: Compound, engine: Box<dyn ConstraintEngine>) -> Self {
        let charge = ChargeModel::build(&compound);
        let multiplier_bound = compound.n_atoms();
        debug!(
            variables = charge.model.num_variables(),
            constraints = charge.model.num_constraints(),
            engine = engine.name(),
            "built charge model"
        );
        Self {
            compound,
            charge,
            engine,
            multiplier_bound,
        }
    }

    /// Exclusive upper bound on excluded multipliers (default: total atom count).
    pub fn with_multiplier_bound(mut self, bound: u32) -> Self {
        self.multiplier_bound = bound;
        self
    }

    pub fn compound(&self) -> &Compound {
        &self.compound
    }

    pub fn model(&self) -> &ChargeModel {
        &self.charge
    }

    /// Enumerates up to `max_results` distinct solutions.
    ///
    /// An unsatisfiable model yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] when `max_results` is zero
    /// - [`Error::Engine`] when the engine rejects the model or fails
    pub fn get_all(&mut self, max_results: usize) -> Result<ChargeSolutions> {
        if max_results == 0 {
            return Err(Error::InvalidConfiguration(
                "max_results must be at least 1".to_string(),
            ));
        }
        self.engine.validate(&self.charge.model)?;

        let mut result = ChargeSolutions::default();
        while result.solutions.len() < max_results {
            match self.engine.check(&self.charge.model)? {
                CheckResult::Satisfiable(assignment) => {
                    let entries = self
                        .charge
                        .ion_ids
                        .iter()
                        .zip(&self.charge.vars.quantities)
                        .map(|(id, &q)| Ok((id.clone(), quantity_value(id, assignment.value(q))?)))
                        .collect::<Result<Vec<_>>>()?;
                    let solution = ChargeSolution::new(entries);
                    debug!(index = result.solutions.len(), %solution, "found solution");
                    self.exclude(&solution);
                    result.solutions.push(solution);
                }
                CheckResult::Unsatisfiable => break,
                CheckResult::Exhausted { steps } => {
                    warn!(steps, found = result.solutions.len(), "search budget exhausted");
                    result.exhausted = true;
                    break;
                }
            }
        }

        if result.solutions.len() == max_results {
            match self.engine.check(&self.charge.model)? {
                CheckResult::Satisfiable(_) => result.truncated = true,
                CheckResult::Unsatisfiable => {}
                CheckResult::Exhausted { .. } => result.exhausted = true,
            }
        }

        info!(
            solutions = result.solutions.len(),
            truncated = result.truncated,
            exhausted = result.exhausted,
            "enumeration finished"
        );
        Ok(result)
    }

    /// Forbids `solution × k` for `k` in `1..multiplier_bound` (always at least `k = 1`).
    fn exclude(&mut self, solution: &ChargeSolution) {
        let quantities = solution.quantities();
        for multiplier in 1..self.multiplier_bound.max(2) {
            let clause = self.charge.exclusion(&quantities, multiplier);
            self.charge.model.add_constraint(
                Constraint::new(clause).with_name(format!("exclusion[{solution}]x{multiplier}")),
            );
        }
    }
}

fn quantity_value(id: &IonId, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        SolverError::ExecutionFailed(format!("engine assigned quantity {value} to {id}")).into()
    })
}
