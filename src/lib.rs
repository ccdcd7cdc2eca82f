//! Vibe Survival - a top-down survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, targeting, combat, progression)
//! - `persistence`: Key-value store collaborator (high score)
//! - `highscores`: Persisted best score on top of the store
//! - `tuning`: Data-driven game balance
//! - `app`: Start screen / session front controller
//! - `ui`: HUD text derived from session state

pub mod app;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::{App, Screen};
pub use highscores::HighScore;
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game loop constants
pub mod consts {
    /// Fixed simulation step used by the headless runner (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the runner feeds into the simulation
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Store key for the persisted best score
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Vector of the given magnitude along `angle`
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

/// Velocity that moves `from` toward `to` at `speed` (zero when already there)
#[inline]
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    if from.distance_squared(to) <= f32::EPSILON {
        return Vec2::ZERO;
    }
    from_angle(angle_between(from, to), speed)
}
