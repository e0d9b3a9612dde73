//! Configuration module for candle-oracle.

pub mod analysis;
pub mod generator;

mod debug; // Private: use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use generator::{GENERATOR, GeneratorSettings};
pub use persistence::PERSISTENCE;
