// Domain module: constraint model, compound data and the charge-balance rules

pub mod charge_model;
pub mod config;
pub mod engine;
pub mod enumeration;
pub mod error;
pub mod models;
pub mod species;
pub mod value_objects;

pub use charge_model::*;
pub use config::*;
pub use engine::{CheckResult, ConstraintEngine, SolverError};
pub use enumeration::*;
pub use error::Error;
pub use models::*;
pub use species::*;
pub use value_objects::*;
