// Synthetic data generation, series files and the error journal
pub mod error_journal;
pub mod generator;
pub mod series_file;

// Re-export commonly used types
pub use error_journal::{ErrorJournal, JournalEntry};
pub use generator::CandleSeriesGenerator;
pub use series_file::{load_series, save_series};
