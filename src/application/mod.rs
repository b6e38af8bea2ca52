// Application layer: formula-to-compound resolution and the guess use case
pub mod guess;
pub mod resolver;

pub use guess::guess_oxidation_states;
pub use resolver::resolve;
