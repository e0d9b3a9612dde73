use serde::{Deserialize, Serialize};
use std::fmt;

/// A labelled hypothesis about where price goes next.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    #[default]
    Bullish,
    Bearish,
    Sideways,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScenarioKind::Bullish => write!(f, "Bullish"),
            ScenarioKind::Bearish => write!(f, "Bearish"),
            ScenarioKind::Sideways => write!(f, "Sideways"),
        }
    }
}
