pub mod config;
pub mod error;
pub mod nestgen;
pub mod types;

pub use config::NestConfig;
pub use error::{InvariantViolation, NestError};
pub use nestgen::{GeneratedNest, NestGenerator, RandomSource, SeededRandom, generate_nest};
pub use types::*;
