// crates/network/src/progress.rs
//! Progress emitter: raw transport progress to directional progress events

use resync_core::{Direction, ProgressEvent, ProgressPhase};

/// Progress as a transport observes it, before a direction is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawProgress {
    pub loaded: u64,
    pub total: Option<u64>,
    pub phase: ProgressPhase,
}

impl RawProgress {
    pub fn progress(loaded: u64, total: Option<u64>) -> Self {
        Self {
            loaded,
            total,
            phase: ProgressPhase::Progress,
        }
    }

    pub fn load_end(loaded: u64, total: Option<u64>) -> Self {
        Self {
            loaded,
            total,
            phase: ProgressPhase::LoadEnd,
        }
    }
}

/// Tags a raw progress sample with its direction
pub fn emit_progress(raw: RawProgress, direction: Direction) -> ProgressEvent {
    ProgressEvent {
        direction,
        phase: raw.phase,
        loaded: raw.loaded,
        total: raw.total,
    }
}
