//! HUD text derived from session state

use glam::Vec2;

use crate::sim::SimulationSession;

/// A "LEVEL UP!" caption as it should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerView {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Numbers the HUD shows during a run
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub high_score: u64,
    pub banners: Vec<BannerView>,
}

impl HudSnapshot {
    pub fn from_session(session: &SimulationSession) -> Self {
        let p = &session.progression.state;
        Self {
            score: p.score,
            hp: session.player.combat.hp,
            max_hp: session.player.combat.max_hp,
            level: p.level,
            xp: p.xp,
            xp_to_next: p.xp_to_next,
            high_score: session.progression.high_score,
            banners: banner_views(session),
        }
    }

    pub fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn hp_line(&self) -> String {
        format!("HP: {}", self.hp)
    }

    pub fn level_line(&self) -> String {
        format!("LV: {} ({}/{})", self.level, self.xp, self.xp_to_next)
    }
}

/// Level-up banners drifting up and fading out over their lifetime
pub fn banner_views(session: &SimulationSession) -> Vec<BannerView> {
    let effects = &session.tuning.effects;
    session
        .banners
        .iter()
        .map(|b| {
            let (pos, alpha) = b.appearance(session.clock.now_ms, effects.banner_ms, effects.banner_rise);
            BannerView { pos, alpha }
        })
        .collect()
}

/// Start screen high score caption
pub fn high_score_line(high_score: u64) -> String {
    format!("HIGH SCORE: {}", high_score)
}
