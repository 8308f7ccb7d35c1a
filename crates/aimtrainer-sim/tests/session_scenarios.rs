//! End-to-end session scenarios driven through the public engine API.

use glam::DVec3;

use aimtrainer_core::commands::{InputEvent, PlayerCommand};
use aimtrainer_core::constants::{EYE_HEIGHT, FRAME_DT};
use aimtrainer_core::enums::{GameState, Grade};
use aimtrainer_core::events::FeedbackEvent;
use aimtrainer_core::settings::GameSettings;
use aimtrainer_core::types::{Ray, Target};
use aimtrainer_sim::systems::hit_resolver;
use aimtrainer_sim::{ClockTick, SessionEngine, SimConfig};

fn eye() -> DVec3 {
    DVec3::new(0.0, EYE_HEIGHT, 0.0)
}

fn engine_with(target_count: u32, duration: u32) -> SessionEngine {
    SessionEngine::new(SimConfig {
        seed: 2024,
        settings: GameSettings {
            target_count,
            duration,
            ..Default::default()
        },
    })
}

fn send(engine: &mut SessionEngine, at_ms: f64, command: PlayerCommand) {
    engine.push_input(InputEvent::new(at_ms, command));
    engine.tick(FRAME_DT);
}

/// A live target whose center ray resolves to itself. The target nearest the
/// eye always qualifies, so one exists whenever targets are live.
fn clear_shot(engine: &SessionEngine) -> Target {
    let live = engine.live_targets();
    let size = engine.settings().target_size;
    live.iter()
        .copied()
        .find(|t| {
            let ray = Ray::toward(eye(), t.position.into());
            hit_resolver::resolve(&ray, &live, size).is_some_and(|h| h.target_id == t.id)
        })
        .expect("nearest target is always a clear shot")
}

fn fire_at(target: &Target) -> PlayerCommand {
    PlayerCommand::Fire {
        ray: Ray::toward(eye(), target.position.into()),
    }
}

fn fire_at_sky() -> PlayerCommand {
    PlayerCommand::Fire {
        ray: Ray::new(eye(), DVec3::Y),
    }
}

#[test]
fn ten_shots_seven_hits_statistics() {
    let mut engine = engine_with(3, 60);
    send(&mut engine, 0.0, PlayerCommand::Start);

    let reactions = [200.0, 250.0, 300.0, 150.0, 400.0, 350.0, 280.0];
    for (i, rt) in reactions.iter().enumerate() {
        let target = clear_shot(&engine);
        send(&mut engine, target.spawn_ms + rt, fire_at(&target));
        // Interleave the three misses.
        if i % 2 == 0 && i < 6 {
            send(&mut engine, target.spawn_ms + rt + 10.0, fire_at_sky());
        }
        assert_eq!(engine.live_targets().len(), 3);
    }

    let stats = engine.stats();
    assert_eq!(stats.shots_fired, 10);
    assert_eq!(stats.shots_hit, 7);
    assert_eq!(stats.score, 700);
    assert!((stats.accuracy - 70.0).abs() < 1e-9);
    assert_eq!(
        (stats.avg_reaction_time * 100.0).round() / 100.0,
        275.71,
        "avg reaction {}",
        stats.avg_reaction_time
    );
    let recorded: Vec<f64> = stats.hit_history.iter().map(|h| h.reaction_time).collect();
    assert_eq!(recorded, reactions);
}

#[test]
fn live_target_count_holds_every_tick() {
    let mut engine = engine_with(6, 60);
    send(&mut engine, 0.0, PlayerCommand::Start);

    let mut now = 0.0;
    for i in 0..200 {
        now += 16.0;
        let command = if i % 3 == 0 {
            fire_at_sky()
        } else {
            fire_at(&clear_shot(&engine))
        };
        engine.push_input(InputEvent::new(now, command));
        let snap = engine.tick(FRAME_DT);
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.targets.len(), 6, "tick {i}");
    }
}

#[test]
fn countdown_finishes_session_at_zero() {
    let mut engine = engine_with(3, 5);
    send(&mut engine, 0.0, PlayerCommand::Start);
    let token = engine.clock_token().unwrap();

    for expected in (1..5).rev() {
        assert_eq!(
            engine.clock_tick(token),
            ClockTick::Running {
                time_left: expected
            }
        );
        assert_eq!(engine.state(), GameState::Playing);
    }
    assert_eq!(engine.clock_tick(token), ClockTick::Expired);
    assert_eq!(engine.state(), GameState::Finished);
    assert_eq!(engine.time_left(), 0);
    assert_eq!(engine.clock_token(), None);

    // A late tick changes nothing and never goes negative.
    assert_eq!(engine.clock_tick(token), ClockTick::Ignored);
    assert_eq!(engine.time_left(), 0);

    let snap = engine.tick(FRAME_DT);
    assert_eq!(snap.state, GameState::Finished);
    assert!(snap.targets.is_empty());
    let report = snap.report.expect("report on finish");
    assert_eq!(report.grade, Grade::D);
    assert!(snap
        .events
        .contains(&FeedbackEvent::SessionFinished { grade: Grade::D }));
}

#[test]
fn pause_preserves_remaining_time() {
    let mut engine = engine_with(3, 60);
    send(&mut engine, 0.0, PlayerCommand::Start);
    let token = engine.clock_token().unwrap();
    for _ in 0..18 {
        engine.clock_tick(token);
    }
    assert_eq!(engine.time_left(), 42);

    let target = clear_shot(&engine);
    send(&mut engine, 18_100.0, fire_at(&target));
    let targets_before = engine.live_targets();
    let stats_before = engine.stats().clone();

    send(&mut engine, 18_200.0, PlayerCommand::TogglePause);
    assert_eq!(engine.state(), GameState::Paused);
    assert_eq!(engine.clock_token(), None);

    // Ten seconds of wall time: frames keep coming, the old timer keeps firing.
    for _ in 0..10 {
        assert_eq!(engine.clock_tick(token), ClockTick::Ignored);
        for _ in 0..60 {
            engine.tick(FRAME_DT);
        }
    }

    send(&mut engine, 28_200.0, PlayerCommand::TogglePause);
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.time_left(), 42);
    assert_eq!(engine.live_targets(), targets_before);
    assert_eq!(engine.stats(), &stats_before);

    let resumed = engine.clock_token().unwrap();
    assert_ne!(resumed, token);
    assert_eq!(
        engine.clock_tick(resumed),
        ClockTick::Running { time_left: 41 }
    );
}

#[test]
fn restart_resets_and_cancels_old_timer() {
    let mut engine = engine_with(2, 10);
    send(&mut engine, 0.0, PlayerCommand::Start);
    let first = engine.clock_token().unwrap();
    engine.clock_tick(first);
    let target = clear_shot(&engine);
    send(&mut engine, 300.0, fire_at(&target));
    send(&mut engine, 400.0, PlayerCommand::TogglePause);

    send(&mut engine, 500.0, PlayerCommand::Restart);
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.time_left(), 10);
    assert_eq!(engine.stats().shots_fired, 0);
    assert!(engine.stats().hit_history.is_empty());
    let live = engine.live_targets();
    assert_eq!(live.len(), 2);
    assert!(live.iter().all(|t| t.spawn_ms == 500.0));

    // The timer from the first session must not reach this one.
    assert_eq!(engine.clock_tick(first), ClockTick::Ignored);
    assert_eq!(engine.time_left(), 10);
}

#[test]
fn finished_stats_are_frozen_until_restart() {
    let mut engine = engine_with(3, 1);
    send(&mut engine, 0.0, PlayerCommand::Start);
    let target = clear_shot(&engine);
    send(&mut engine, 320.0, fire_at(&target));

    let token = engine.clock_token().unwrap();
    assert_eq!(engine.clock_tick(token), ClockTick::Expired);
    let frozen = engine.stats().clone();

    send(&mut engine, 1_500.0, fire_at_sky());
    send(&mut engine, 1_600.0, PlayerCommand::TogglePause);
    send(&mut engine, 1_700.0, PlayerCommand::Start);
    assert_eq!(engine.state(), GameState::Finished);
    assert_eq!(engine.stats(), &frozen);

    let report = engine.report().unwrap();
    assert_eq!(report.shots_fired, 1);
    assert_eq!(report.accuracy, 100.0);
    assert_eq!(report.avg_reaction_time, 320.0);
    assert_eq!(report.reaction_std_dev, 0.0);
    assert_eq!(report.grade, Grade::S);

    send(&mut engine, 2_000.0, PlayerCommand::Restart);
    assert_eq!(engine.state(), GameState::Playing);
    assert!(engine.report().is_none());
    assert_eq!(engine.stats().shots_fired, 0);
}

#[test]
fn return_to_menu_from_any_state() {
    let mut engine = engine_with(3, 30);

    send(&mut engine, 0.0, PlayerCommand::ReturnToMenu);
    assert_eq!(engine.state(), GameState::Menu);

    send(&mut engine, 10.0, PlayerCommand::Start);
    let token = engine.clock_token().unwrap();
    send(&mut engine, 20.0, PlayerCommand::ReturnToMenu);
    assert_eq!(engine.state(), GameState::Menu);
    assert!(engine.live_targets().is_empty());
    assert_eq!(engine.clock_token(), None);
    assert_eq!(engine.clock_tick(token), ClockTick::Ignored);
    assert_eq!(engine.time_left(), 30);

    send(&mut engine, 30.0, PlayerCommand::Start);
    send(&mut engine, 40.0, PlayerCommand::TogglePause);
    send(&mut engine, 50.0, PlayerCommand::ReturnToMenu);
    assert_eq!(engine.state(), GameState::Menu);

    // Restart is not a menu action.
    send(&mut engine, 60.0, PlayerCommand::Restart);
    assert_eq!(engine.state(), GameState::Menu);
}

#[test]
fn stale_hit_after_consumption_is_a_miss() {
    let mut engine = engine_with(1, 30);
    send(&mut engine, 0.0, PlayerCommand::Start);
    let target = clear_shot(&engine);

    // Two shots at the same spot in one tick: the first consumes the target,
    // the second resolves against the replacement set.
    engine.push_inputs([
        InputEvent::new(100.0, fire_at(&target)),
        InputEvent::new(100.0, fire_at(&target)),
    ]);
    let snap = engine.tick(FRAME_DT);

    assert_eq!(snap.targets.len(), 1);
    assert_eq!(snap.stats.shots_fired, 2);
    assert!(snap.stats.shots_hit >= 1);
    assert_eq!(
        snap.events
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::TargetHit { target_id, .. } if *target_id == target.id))
            .count(),
        1
    );
}
