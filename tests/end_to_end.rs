//! Whole-session scenarios driven through the public API.

use glam::Vec2;

use vibe_survival::consts::SIM_DT_MS;
use vibe_survival::sim::{GameEvent, GamePhase, SimulationSession, TickInput, tick};
use vibe_survival::{App, HighScore, KeyValueStore, MemoryStore, Screen, Tuning};

fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    // No surprise spawns while a scenario is being staged
    tuning.spawn.interval_ms = 1.0e9;
    tuning
}

#[test]
fn contact_damage_until_game_over() {
    let mut session = SimulationSession::new(42, quiet_tuning(), 0);
    let mut store = MemoryStore::new();
    assert_eq!(session.player.body.pos, Vec2::new(400.0, 300.0));
    assert_eq!(session.player.combat.hp, 100);

    // Let a hostile walk in from out of range of the auto-attack
    let no_keys = TickInput::default();
    session.spawn_hostile(Vec2::new(720.0, 300.0));
    let mut first_hit = None;
    for _ in 0..600 {
        let hostile_pos = session.hostiles[0].body.pos;
        tick(&mut session, &no_keys, SIM_DT_MS, &mut store);
        let hit = session.drain_events().into_iter().find_map(|e| match e {
            GameEvent::PlayerHit { hp, knockback } => Some((hp, knockback, hostile_pos)),
            _ => None,
        });
        if hit.is_some() {
            first_hit = hit;
            break;
        }
    }
    let (hp, knockback, hostile_pos) = first_hit.expect("hostile never reached the player");
    assert_eq!(hp, 90);
    assert!((knockback.length() - 400.0).abs() < 1e-2);
    // Hostile approached from the right, so the player is thrown left
    assert!(hostile_pos.x > session.player.body.pos.x);
    assert!(knockback.x < 0.0);

    // Nine more uncontested contacts
    for contact in 2..=10 {
        let player_pos = session.player.body.pos;
        session.hostiles[0].body.pos = player_pos + Vec2::new(20.0, 0.0);
        tick(&mut session, &no_keys, 1.0, &mut store);
        assert_eq!(session.player.combat.hp, 100 - 10 * contact);
    }
    assert_eq!(session.player.combat.hp, 0);
    assert_eq!(session.phase, GamePhase::GameOver);
    assert!(session.is_over());

    // Further contacts are ignored
    let player_pos = session.player.body.pos;
    session.hostiles[0].body.pos = player_pos + Vec2::new(20.0, 0.0);
    tick(&mut session, &no_keys, 1.0, &mut store);
    assert_eq!(session.player.combat.hp, 0);
}

#[test]
fn single_death_notification() {
    let mut session = SimulationSession::new(5, quiet_tuning(), 0);
    let mut store = MemoryStore::new();
    session.player.combat.hp = 10;
    session.spawn_hostile(Vec2::new(390.0, 300.0));
    session.spawn_hostile(Vec2::new(410.0, 300.0));
    session.spawn_hostile(Vec2::new(400.0, 310.0));
    tick(&mut session, &TickInput::default(), 1.0, &mut store);

    let game_overs = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameOver(_)))
        .count();
    assert_eq!(game_overs, 1);
    assert_eq!(session.player.combat.hp, 0);
}

#[test]
fn autopilot_run_records_high_score() {
    let mut store = MemoryStore::new();
    store.set("highScore", 150).unwrap();
    let mut app = App::new(Box::new(store), Tuning::default());
    app.start(2024);

    let input = TickInput::idle();
    let mut final_score = None;
    for _ in 0..(60 * 60 * 5) {
        for event in app.update(&input, SIM_DT_MS) {
            if let GameEvent::GameOver(summary) = event {
                final_score = Some(summary.score);
            }
        }
        let Some(session) = app.session() else {
            break;
        };
        let p = &session.progression.state;
        assert!(p.xp < p.xp_to_next);
        assert!(session.player.combat.hp >= 0);
        assert!(session.player.combat.hp <= session.player.combat.max_hp);
    }

    match final_score {
        Some(score) => {
            assert_eq!(app.high_score(), score.max(150));
            if app.session().is_none() {
                assert_eq!(app.screen(), Screen::Start { high_score: score.max(150) });
            }
        }
        // Survived the whole window; the stored best is untouched
        None => assert_eq!(app.high_score(), 150),
    }
}

#[test]
fn high_score_survives_between_sessions() {
    let mut store = MemoryStore::new();
    for (run, score) in [(1u64, 400u64), (2, 200), (3, 900)] {
        let mut session = SimulationSession::new(run, quiet_tuning(), HighScore::load(&store));
        session.progression.state.score = score;
        session.player.combat.hp = 10;
        session.spawn_hostile(Vec2::new(405.0, 300.0));
        tick(&mut session, &TickInput::default(), 1.0, &mut store);
        assert!(session.is_over());
    }
    assert_eq!(HighScore::load(&store), 900);
}
