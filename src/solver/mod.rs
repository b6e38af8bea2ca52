// Engine adapters: concrete implementations of ConstraintEngine

pub mod backtracking;
#[cfg(feature = "mip")]
pub mod coin_cbc_solver;
pub mod factory;
#[cfg(feature = "mip")]
pub mod highs_solver;
#[cfg(feature = "mip")]
pub mod linearize;

pub use backtracking::BacktrackingSolver;
#[cfg(feature = "mip")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use factory::SolverFactory;
#[cfg(feature = "mip")]
pub use highs_solver::HighsSolver;
