// Use case: formula text to enumerated oxidation-state assignments

use tracing::info;

use crate::domain::{
    config::GuessConfig,
    enumeration::{ChargeBalanceSolver, ChargeSolutions},
    error::Result,
};
use crate::solver::SolverFactory;

use super::resolver::resolve;

/// Resolves `formula`, builds the charge model and enumerates solutions.
///
/// # Errors
///
/// Any resolver, validation, configuration or engine error. An
/// unsatisfiable compound is not an error and yields an empty list.
pub fn guess_oxidation_states(formula: &str, config: &GuessConfig) -> Result<ChargeSolutions> {
    config.validate()?;
    let compound = resolve(formula, config.policy)?.validate()?;
    let engine = SolverFactory::create_solver(config)?;
    info!(
        formula,
        policy = %config.policy,
        engine = engine.name(),
        atoms = compound.n_atoms(),
        candidates = compound.num_ions(),
        "guessing oxidation states"
    );

    let mut solver = ChargeBalanceSolver::with_engine(compound, engine);
    if let Some(bound) = config.multiplier_bound {
        solver = solver.with_multiplier_bound(bound);
    }
    solver.get_all(config.max_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{error::Error, species::IonId, value_objects::OxidationPolicy};

    #[test]
    fn sodium_chloride_has_one_assignment() {
        let solutions = guess_oxidation_states("NaCl", &GuessConfig::default()).unwrap();
        assert_eq!(solutions.len(), 1);
        let solution = &solutions.solutions[0];
        assert_eq!(solution.quantity(&IonId::new("Na", 1)), Some(1));
        assert_eq!(solution.quantity(&IonId::new("Cl", -1)), Some(1));
        assert!(!solutions.truncated);
    }

    #[test]
    fn iron_oxide_with_common_states() {
        let config = GuessConfig::default().with_policy(OxidationPolicy::Common);
        let solutions = guess_oxidation_states("Fe2O3", &config).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions.solutions[0].to_string(), "Fe3+: 2, O2-: 3");
    }

    #[test]
    fn invalid_config_is_rejected_before_solving() {
        let config = GuessConfig::default().with_max_results(0);
        assert!(matches!(
            guess_oxidation_states("NaCl", &config),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
