//! Persistent win/loss counters.
//!
//! The stats file holds two `KEY: value` lines:
//!
//! ```text
//! WINS: 3
//! LOSSES: 1
//! ```
//!
//! Line order is not significant and unknown keys are ignored. A known key
//! with a value that is not a counter makes the file malformed, and it is
//! left untouched. The file is rewritten in full on every update.

use crate::error::StatsError;
use crate::{debug_log, info_log};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsRecord {
    pub wins: u32,
    pub losses: u32,
}

impl StatsRecord {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Percentage of rounds won, or `None` when no rounds have been played.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(total) * 100.0)
        }
    }

    /// Copy of this record with one more win or loss.
    #[must_use]
    pub fn with_outcome(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self {
                wins: self.wins.saturating_add(1),
                ..self
            },
            Outcome::Loss => Self {
                losses: self.losses.saturating_add(1),
                ..self
            },
        }
    }

    /// Parse the stats file format.
    ///
    /// # Errors
    ///
    /// Returns the trimmed offending line when a `WINS` or `LOSSES` value is
    /// not a non-negative integer.
    pub fn parse(data: &str) -> Result<Self, String> {
        let mut record = Self::default();
        for line in data.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_uppercase();
            let slot = match key.as_str() {
                "WINS" => &mut record.wins,
                "LOSSES" => &mut record.losses,
                _ => {
                    debug_log!("Ignoring unknown stats key '{}'", key);
                    continue;
                }
            };
            *slot = value.trim().parse::<u32>().map_err(|e| {
                log::warn!("Bad stats value for {key}: '{}' ({e})", value.trim());
                line.trim().to_string()
            })?;
        }
        Ok(record)
    }

    #[must_use]
    pub fn to_file_contents(&self) -> String {
        format!("WINS: {}\nLOSSES: {}\n", self.wins, self.losses)
    }
}

/// Reads and rewrites the stats file at a fixed location.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current counters. A missing file counts as no games played.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Unreadable` if the file exists but cannot be read,
    /// and `StatsError::Malformed` if a counter value cannot be parsed.
    pub fn load(&self) -> Result<StatsRecord, StatsError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => StatsRecord::parse(&data).map_err(|line| StatsError::Malformed {
                path: self.path.clone(),
                line,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug_log!("No stats file at {}, starting from zero", self.path.display());
                Ok(StatsRecord::default())
            }
            Err(source) => Err(StatsError::Unreadable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrite the stats file with `record`.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Unwritable` if the file or its directory cannot be written.
    pub fn save(&self, record: &StatsRecord) -> Result<(), StatsError> {
        self.write(record).map_err(|source| StatsError::Unwritable {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, record: &StatsRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record.to_file_contents())
    }

    /// Add one win or loss to the stored counters and persist the result.
    ///
    /// # Errors
    ///
    /// Fails if the current record cannot be read or parsed, or the new one
    /// cannot be written. A malformed file is never overwritten, and nothing
    /// is returned as updated in that case.
    pub fn record_outcome(&self, outcome: Outcome) -> Result<StatsRecord, StatsError> {
        let updated = self.load()?.with_outcome(outcome);
        self.save(&updated)?;
        info_log!(
            "Recorded {:?}: {} wins, {} losses",
            outcome,
            updated.wins,
            updated.losses
        );
        Ok(updated)
    }
}
