//! Upload and download progress notifications

use serde::{Deserialize, Serialize};

/// Which half of the exchange a progress event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Request body upload
    Up,
    /// Response body download
    Down,
}

/// Transport callback that produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPhase {
    /// Intermediate progress
    Progress,
    /// The direction finished transferring
    LoadEnd,
}

/// Directional progress of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub direction: Direction,
    pub phase: ProgressPhase,
    /// Bytes transferred so far
    pub loaded: u64,
    /// Total bytes to transfer, when known
    pub total: Option<u64>,
}

impl ProgressEvent {
    /// Returns true when the total size is known
    pub fn length_computable(&self) -> bool {
        self.total.is_some()
    }

    /// Returns progress as a percentage (0-100)
    pub fn percentage(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.loaded as f64 / total as f64 * 100.0).min(100.0)
            }
        })
    }

    /// Returns true once every byte has been transferred
    pub fn is_complete(&self) -> bool {
        match self.total {
            Some(total) => self.loaded >= total,
            None => self.phase == ProgressPhase::LoadEnd,
        }
    }
}
