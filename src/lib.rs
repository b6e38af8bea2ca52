// Domain layer: compound data, constraint model and charge-balance enumeration
pub mod domain;

// Application layer: formula resolution and the guess use case
pub mod application;

// Infrastructure layer: periodic-table data and formula parsing
pub mod infrastructure;

// Engine adapters: concrete implementations of ConstraintEngine
pub mod solver;

// Re-export commonly used types
pub use domain::{
    ChargeBalanceSolver, ChargeSolution, ChargeSolutions, CheckResult, Compound, CompoundInput,
    ConstraintEngine, ConstraintModel, EngineBackend, GuessConfig, Ion, IonId, OxidationPolicy,
    SolverError,
};

pub use domain::Error as GuessError;

pub use application::{guess_oxidation_states, resolve};

pub use solver::{BacktrackingSolver, SolverFactory};

#[cfg(feature = "mip")]
pub use solver::{CoinCbcSolver, HighsSolver};
