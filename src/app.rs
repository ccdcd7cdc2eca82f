//! Start screen and session lifecycle
//!
//! `App` is what a presentation layer drives: it owns the store for the life
//! of the process, builds a fresh session on `start`, ticks it, and drops back
//! to the start screen when the session ends.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GamePhase, SimulationSession, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::HudSnapshot;

/// What the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start { high_score: u64 },
    Playing,
}

/// Front controller over one store and at most one session
pub struct App {
    store: Box<dyn KeyValueStore>,
    tuning: Tuning,
    session: Option<SimulationSession>,
}

impl App {
    pub fn new(store: Box<dyn KeyValueStore>, tuning: Tuning) -> Self {
        Self {
            store,
            tuning,
            session: None,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.session {
            Some(_) => Screen::Playing,
            None => Screen::Start {
                high_score: HighScore::load(self.store.as_ref()),
            },
        }
    }

    /// Begin a new run, replacing any current one
    pub fn start(&mut self, seed: u64) {
        let high_score = HighScore::load(self.store.as_ref());
        self.session = Some(SimulationSession::new(seed, self.tuning, high_score));
    }

    /// Advance the current run. Returns its events; an ended run is dropped.
    pub fn update(&mut self, input: &TickInput, delta_ms: f64) -> Vec<GameEvent> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        tick(session, input, delta_ms, self.store.as_mut());
        let events = session.drain_events();
        if session.phase == GamePhase::Ended {
            self.session = None;
        }
        events
    }

    pub fn session(&self) -> Option<&SimulationSession> {
        self.session.as_ref()
    }

    pub fn hud(&self) -> Option<HudSnapshot> {
        self.session.as_ref().map(HudSnapshot::from_session)
    }

    pub fn high_score(&self) -> u64 {
        HighScore::load(self.store.as_ref())
    }
}
