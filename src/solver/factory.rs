use crate::domain::{
    config::GuessConfig,
    engine::{ConstraintEngine, Result},
    value_objects::EngineBackend,
};
use crate::solver::BacktrackingSolver;
#[cfg(feature = "mip")]
use crate::solver::{CoinCbcSolver, HighsSolver};
use tracing::warn;

/// Factory for creating engine instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create an engine from the guess configuration
    pub fn create_solver(config: &GuessConfig) -> Result<Box<dyn ConstraintEngine>> {
        Self::create_from_backend(config.backend, config.step_limit)
    }

    /// Create an engine for a specific backend
    pub fn create_from_backend(
        backend: EngineBackend,
        step_limit: Option<u64>,
    ) -> Result<Box<dyn ConstraintEngine>> {
        let engine: Box<dyn ConstraintEngine> = match backend {
            EngineBackend::Backtracking => Box::new(match step_limit {
                Some(limit) => BacktrackingSolver::with_step_limit(limit),
                None => BacktrackingSolver::new(),
            }),
            #[cfg(feature = "mip")]
            EngineBackend::CoinCbc => Box::new(CoinCbcSolver::new()),
            #[cfg(feature = "mip")]
            EngineBackend::Highs => Box::new(HighsSolver::new()),
            #[cfg(not(feature = "mip"))]
            EngineBackend::CoinCbc | EngineBackend::Highs => {
                return Err(crate::domain::engine::SolverError::SolverNotAvailable(format!(
                    "{backend} requires the `mip` feature"
                )))
            }
        };

        if step_limit.is_some() && !engine.supports_step_limit() {
            warn!(engine = engine.name(), "engine ignores the step limit");
        }
        Ok(engine)
    }

    /// Get the default engine (backtracking, unlimited)
    pub fn default_solver() -> Box<dyn ConstraintEngine> {
        Box::new(BacktrackingSolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_is_backtracking() {
        let engine = SolverFactory::create_solver(&GuessConfig::default()).unwrap();
        assert_eq!(engine.name(), "Backtracking");
        assert!(engine.supports_step_limit());
        assert_eq!(SolverFactory::default_solver().name(), "Backtracking");
    }

    #[cfg(not(feature = "mip"))]
    #[test]
    fn mip_backends_need_the_feature() {
        use crate::domain::engine::SolverError;

        let err = SolverFactory::create_from_backend(EngineBackend::Highs, None).err().unwrap();
        assert!(matches!(err, SolverError::SolverNotAvailable(_)));
    }

    #[cfg(feature = "mip")]
    #[test]
    fn mip_backends_are_available_with_the_feature() {
        let cbc = SolverFactory::create_from_backend(EngineBackend::CoinCbc, None).unwrap();
        assert_eq!(cbc.name(), "COIN-OR CBC");
        let highs = SolverFactory::create_from_backend(EngineBackend::Highs, None).unwrap();
        assert_eq!(highs.name(), "HiGHS");
    }
}
