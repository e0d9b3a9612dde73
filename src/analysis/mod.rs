// Indicator math, scenario parameters and path synthesis (pure, no I/O)
pub mod display_probability;
pub mod forecast;
pub mod indicators;
pub mod levels;
pub mod path_synthesis;
pub mod scenario_params;

// Re-export commonly used functions
pub use display_probability::display_probability;
pub use forecast::generate_predictions;
pub use levels::levels;
pub use path_synthesis::synthesize;
pub use scenario_params::build_scenarios;
