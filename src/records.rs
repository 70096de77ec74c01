//! Best runs of the current process
//!
//! Kept in memory only; a new process starts with an empty board.

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Maximum number of runs to keep
pub const MAX_RECORDS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub kills: u32,
    pub max_level: u32,
    pub player_level: u32,
    /// Seed the run was played with
    pub seed: u64,
}

impl RunRecord {
    pub fn new(summary: RunSummary, seed: u64) -> Self {
        Self {
            kills: summary.kills,
            max_level: summary.max_level,
            player_level: summary.player_level,
            seed,
        }
    }

    /// Ranking key: kills first, then deepest level
    fn rank_key(&self) -> (u32, u32) {
        (self.kills, self.max_level)
    }
}

/// Leaderboard of finished runs, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunRecords {
    pub entries: Vec<RunRecord>,
}

impl RunRecords {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run would make the board
    pub fn qualifies(&self, record: &RunRecord) -> bool {
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        self.entries
            .last()
            .map(|e| record.rank_key() > e.rank_key())
            .unwrap_or(true)
    }

    /// Add a finished run.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, record: RunRecord) -> Option<usize> {
        if !self.qualifies(&record) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| record.rank_key() > e.rank_key());
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_RECORDS);

        log::debug!("Run recorded at rank {} ({} kills)", rank, record.kills);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }
}
