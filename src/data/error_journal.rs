use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{DEBUG_FLAGS, PERSISTENCE};
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub message: String,
    /// Which part of the app raised it (e.g. "engine", "cli")
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// Capped error log persisted as a JSON array. Oldest entries fall off first.
#[derive(Debug, Clone)]
pub struct ErrorJournal {
    path: PathBuf,
    capacity: usize,
    entries: VecDeque<JournalEntry>,
}

impl ErrorJournal {
    /// Open the journal at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_capacity(path, PERSISTENCE.journal.max_entries)
    }

    pub fn open_with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Result<Self> {
        let path = path.into();
        let mut entries: VecDeque<JournalEntry> = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            VecDeque::new()
        };

        while entries.len() > capacity {
            entries.pop_front();
        }

        Ok(Self {
            path,
            capacity,
            entries,
        })
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(PERSISTENCE.journal.path)
    }

    /// Append an entry, drop the oldest beyond capacity, and write the file.
    pub fn record(
        &mut self,
        source: &str,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.entries.push_back(JournalEntry {
            message: message.into(),
            source: source.to_string(),
            timestamp,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.save()
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush()?;

        if cfg!(debug_assertions) && DEBUG_FLAGS.print_journal_writes {
            log::info!(
                "Error journal: {} entries written to {}",
                self.entries.len(),
                self.path.display()
            );
        }
        Ok(())
    }
}
