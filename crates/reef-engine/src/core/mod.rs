pub mod rng;
pub mod scheduler;
