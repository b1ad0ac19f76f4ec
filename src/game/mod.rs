pub mod logic;
pub mod rng;
pub mod types;
