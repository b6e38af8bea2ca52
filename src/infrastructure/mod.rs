// Infrastructure: element data and formula parsing
pub mod formula;
pub mod periodic_table;

pub use formula::parse_formula;
pub use periodic_table::{lookup, ElementData};
