//! Experience, levels, score and the end of a run

use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::tuning::ProgressionTuning;

/// Experience and score for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub xp: u32,
    pub level: u32,
    pub xp_to_next: u32,
    pub score: u64,
}

impl ProgressionState {
    pub fn new(tuning: &ProgressionTuning) -> Self {
        Self {
            xp: 0,
            level: 1,
            xp_to_next: tuning.first_threshold.max(1),
            score: 0,
        }
    }

    /// Add experience and score, then take every level-up it pays for.
    ///
    /// Returns the number of levels gained. Afterwards `xp < xp_to_next`.
    pub fn award_xp(&mut self, amount: u32, tuning: &ProgressionTuning) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        self.score = self
            .score
            .saturating_add(u64::from(amount) * tuning.score_per_xp);

        let mut gained = 0;
        while self.xp >= self.xp_to_next {
            self.level += 1;
            self.xp -= self.xp_to_next;
            self.xp_to_next = next_threshold(self.xp_to_next, tuning);
            gained += 1;
        }
        gained
    }
}

/// `floor(current * growth)` in integer math, never below 1
fn next_threshold(current: u32, tuning: &ProgressionTuning) -> u32 {
    let grown = u64::from(current) * u64::from(tuning.threshold_growth_percent) / 100;
    grown.clamp(1, u64::from(u32::MAX)) as u32
}

/// Final numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    /// Best score after this run was recorded
    pub high_score: u64,
    pub new_record: bool,
}

/// Owns progression and the one-way `Playing -> GameOver` switch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionController {
    pub state: ProgressionState,
    /// Best score read from the store when the session started
    pub high_score: u64,
    game_over: bool,
}

impl ProgressionController {
    pub fn new(tuning: &ProgressionTuning, high_score: u64) -> Self {
        Self {
            state: ProgressionState::new(tuning),
            high_score,
            game_over: false,
        }
    }

    /// Award experience for a kill. Returns levels gained; always 0 once the
    /// run is over.
    pub fn award_xp(&mut self, amount: u32, tuning: &ProgressionTuning) -> u32 {
        if self.game_over {
            return 0;
        }
        let gained = self.state.award_xp(amount, tuning);
        if gained > 0 {
            log::info!(
                "Level up: now level {} ({}/{} xp)",
                self.state.level,
                self.state.xp,
                self.state.xp_to_next
            );
        }
        gained
    }

    /// End the run and record the score. Only the first call has any effect.
    pub fn on_player_death(&mut self, store: &mut dyn KeyValueStore) -> Option<RunSummary> {
        if self.game_over {
            return None;
        }
        self.game_over = true;

        let new_record = HighScore::record(store, self.state.score);
        self.high_score = HighScore::load(store);
        log::info!(
            "Game over: score {}, level {}, best {}",
            self.state.score,
            self.state.level,
            self.high_score
        );
        Some(RunSummary {
            score: self.state.score,
            level: self.state.level,
            high_score: self.high_score,
            new_record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    /// Keeps whatever it was built with and refuses every write
    struct FrozenStore(u64);

    impl KeyValueStore for FrozenStore {
        fn get(&self, _key: &str, _default: u64) -> u64 {
            self.0
        }

        fn set(&mut self, key: &str, _value: u64) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn at(xp: u32, xp_to_next: u32) -> ProgressionState {
        ProgressionState {
            xp,
            level: 1,
            xp_to_next,
            score: 0,
        }
    }

    #[test]
    fn test_award_without_level_up() {
        let tuning = ProgressionTuning::default();
        let mut p = ProgressionState::new(&tuning);
        assert_eq!(p.award_xp(20, &tuning), 0);
        assert_eq!((p.xp, p.level, p.score), (20, 1, 200));
    }

    #[test]
    fn test_single_level_up_carries_overflow() {
        let tuning = ProgressionTuning::default();
        let mut p = at(90, 100);
        assert_eq!(p.award_xp(40, &tuning), 1);
        assert_eq!((p.xp, p.level, p.xp_to_next), (30, 2, 120));
    }

    #[test]
    fn test_large_award_levels_twice() {
        let tuning = ProgressionTuning::default();
        let mut p = at(90, 100);
        assert_eq!(p.award_xp(250, &tuning), 2);
        assert_eq!((p.xp, p.level, p.xp_to_next), (120, 3, 144));
        assert!(p.xp < p.xp_to_next);
    }

    #[test]
    fn test_threshold_floors() {
        let tuning = ProgressionTuning::default();
        assert_eq!(next_threshold(144, &tuning), 172);
        assert_eq!(next_threshold(1, &tuning), 1);
    }

    #[test]
    fn test_no_xp_after_game_over() {
        let tuning = ProgressionTuning::default();
        let mut store = MemoryStore::new();
        let mut c = ProgressionController::new(&tuning, 0);
        c.award_xp(20, &tuning);
        let summary = c.on_player_death(&mut store).unwrap();
        assert_eq!(summary.score, 200);
        assert!(summary.new_record);

        assert_eq!(c.award_xp(500, &tuning), 0);
        assert_eq!(c.state.score, 200);
        assert!(c.on_player_death(&mut store).is_none());
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let tuning = ProgressionTuning::default();
        let mut store = MemoryStore::new();
        HighScore::record(&mut store, 5000);
        let mut c = ProgressionController::new(&tuning, HighScore::load(&store));
        c.award_xp(20, &tuning);
        let summary = c.on_player_death(&mut store).unwrap();
        assert!(!summary.new_record);
        assert_eq!(summary.high_score, 5000);
        assert_eq!(HighScore::load(&store), 5000);
    }

    #[test]
    fn test_failed_save_reports_stored_best() {
        let tuning = ProgressionTuning::default();
        let mut store = FrozenStore(300);
        let mut c = ProgressionController::new(&tuning, HighScore::load(&store));
        for _ in 0..5 {
            c.award_xp(20, &tuning);
        }
        let summary = c.on_player_death(&mut store).unwrap();
        assert_eq!(summary.score, 1000);
        assert!(!summary.new_record);
        assert_eq!(summary.high_score, 300);
    }
}
