// Domain types and value objects
pub mod candle;
pub mod scenario;

// Re-export commonly used types
pub use candle::{Candle, CandleType};
pub use scenario::ScenarioKind;
