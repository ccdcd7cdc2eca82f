//! Persisted best score
//!
//! A single integer under `consts::HIGH_SCORE_KEY` that only ever goes up.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// High score access on top of a key-value store
pub struct HighScore;

impl HighScore {
    /// Current best score (0 if never set)
    pub fn load(store: &dyn KeyValueStore) -> u64 {
        store.get(HIGH_SCORE_KEY, 0)
    }

    /// Check if a score beats the stored best
    pub fn qualifies(store: &dyn KeyValueStore, score: u64) -> bool {
        score > Self::load(store)
    }

    /// Store `score` if it beats the current best. Returns whether it did.
    ///
    /// A failed write is logged and reported as no record; the run still ends
    /// normally.
    pub fn record(store: &mut dyn KeyValueStore, score: u64) -> bool {
        if !Self::qualifies(store, score) {
            return false;
        }
        match store.set(HIGH_SCORE_KEY, score) {
            Ok(()) => {
                log::info!("New high score: {}", score);
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score {}: {}", score, e);
                false
            }
        }
    }
}
