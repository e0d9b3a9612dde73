//! File persistence configuration

/// Settings for the capped error journal
pub struct JournalSettings {
    /// Default location of the JSON journal
    pub path: &'static str,
    /// Only the newest `max_entries` survive a write
    pub max_entries: usize,
}

pub struct PersistenceConfig {
    pub journal: JournalSettings,
    /// Decimal places kept on emitted candle prices
    pub price_decimals: i32,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    journal: JournalSettings {
        path: ".candle_oracle_errors.json",
        max_entries: 20,
    },
    price_decimals: 2,
};
