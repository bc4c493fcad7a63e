//! Per-frame simulation tick
//!
//! Advances a round by one frame of `elapsed_ms`. Order matters:
//! input, obstacle stream, balloon, collision, bounds, then passes.

use glam::Vec2;

use super::collision::first_collision;
use super::state::{GameEvent, Outcome, Round};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start a climb (eased model)
    pub ascend: bool,
    /// Burner held down (thrust model)
    pub ascend_held: bool,
    /// Pause toggle
    pub pause_toggle: bool,
    /// End the session
    pub quit: bool,
}

/// Advance the round by one frame, returning what happened
pub fn tick(round: &mut Round, input: &TickInput, elapsed_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        round.quit_requested = true;
        return events;
    }

    // Terminal states absorb everything
    if round.is_over() {
        return events;
    }

    if input.pause_toggle {
        round.paused = !round.paused;
        log::info!("{}", if round.paused { "Paused" } else { "Resumed" });
        events.push(if round.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }
    if round.paused {
        return events;
    }

    let burner_was_on = round.balloon.burner_on;
    if input.ascend {
        if let Some(duration) = round.config.physics.climb_duration_ms() {
            round.balloon.ascend(duration);
        }
    }

    let frame = round.frame_index;
    round.frame_index += 1;
    round.elapsed_ms += elapsed_ms as f64;

    // Obstacles
    let report = round.obstacles.tick(
        &round.config,
        elapsed_ms,
        frame,
        round.balloon.pos.x,
        &mut round.rng,
    );
    events.extend(
        report
            .retired
            .iter()
            .map(|&id| GameEvent::ObstacleRetired { id }),
    );
    if let Some((id, kind)) = report.spawned {
        events.push(GameEvent::ObstacleSpawned { id, kind });
    }

    round.scenery.tick(
        &round.config.clouds,
        elapsed_ms,
        frame,
        round.config.frame_rate,
        Vec2::new(round.config.field_width, round.config.field_height),
        &mut round.rng,
    );

    // Balloon
    round.balloon.update(
        elapsed_ms,
        &round.config.physics,
        input.ascend_held,
        round.config.field_height,
    );
    match (burner_was_on, round.balloon.burner_on) {
        (false, true) => events.push(GameEvent::BurnerIgnited),
        (true, false) => events.push(GameEvent::BurnerExtinguished),
        _ => {}
    }

    // Collision
    if let Some(hit) = first_collision(&round.sprites, &round.balloon, round.obstacles.iter()) {
        let obstacle_id = hit.id;
        log::info!(
            "Hit {} #{} after {} passes",
            hit.kind.as_str(),
            obstacle_id,
            round.state.passed
        );
        events.push(GameEvent::Collision { obstacle_id });
        lose(round, &mut events);
        return events;
    }

    // Bounds
    if round.config.physics.loses_out_of_bounds()
        && !round.balloon.in_bounds(round.config.field_height)
    {
        let y = round.balloon.pos.y;
        log::info!("Balloon left the play-field at y = {:.1}", y);
        events.push(GameEvent::OutOfBounds { y });
        lose(round, &mut events);
        return events;
    }

    // Passes
    for id in report.passed {
        let goal_reached = round.state.record_pass();
        log::debug!("Passed obstacle #{} ({} total)", id, round.state.passed);
        events.push(GameEvent::ObstaclePassed {
            id,
            remaining: round.state.obstacles_remaining,
        });
        if goal_reached {
            round.state.outcome = Outcome::Won;
            log::info!("Round won after {} passes", round.state.passed);
            events.push(GameEvent::RoundWon {
                passed: round.state.passed,
            });
            break;
        }
    }

    events
}

fn lose(round: &mut Round, events: &mut Vec<GameEvent>) {
    round.state.outcome = Outcome::Lost;
    log::info!("Round lost after {} passes", round.state.passed);
    events.push(GameEvent::RoundLost {
        passed: round.state.passed,
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::mask::Mask;
    use crate::sim::obstacle::ObstacleKind;
    use crate::sim::sprites::{SpriteId, SpriteSheet};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn sprites() -> Arc<SpriteSheet> {
        Arc::new(SpriteSheet::procedural().unwrap())
    }

    /// Sheet where the balloon has no opaque pixels, so nothing ever hits it
    fn ghost_sprites() -> Arc<SpriteSheet> {
        let sheet = SpriteSheet::procedural()
            .unwrap()
            .with_mask(SpriteId::BalloonFlameOff, Mask::new(177, 250).unwrap())
            .and_then(|s| s.with_mask(SpriteId::BalloonFlameOn, Mask::new(177, 250).unwrap()))
            .unwrap();
        Arc::new(sheet)
    }

    /// Holds the balloon around mid-field with the eased climb
    fn autopilot(round: &Round) -> TickInput {
        TickInput {
            ascend: round.balloon.pos.y > 450.0 && !round.balloon.is_climbing(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sinks_then_lost_out_of_bounds() {
        let mut round = Round::new(GameConfig::default(), sprites(), 1).unwrap();
        let mut last_y = round.balloon.pos.y;
        let mut events = Vec::new();
        for _ in 0..1000 {
            events = tick(&mut round, &TickInput::default(), FRAME_MS);
            if round.is_over() {
                break;
            }
            assert!(round.balloon.pos.y > last_y);
            last_y = round.balloon.pos.y;
        }
        assert_eq!(round.outcome(), Outcome::Lost);
        assert!(matches!(events[events.len() - 2], GameEvent::OutOfBounds { .. }));
        assert_eq!(events[events.len() - 1], GameEvent::RoundLost { passed: 0 });
    }

    #[test]
    fn test_collision_loses() {
        let mut round = Round::new(GameConfig::default(), sprites(), 1).unwrap();
        let id = round
            .obstacles
            .push(ObstacleKind::Saucer, Vec2::new(40.0, 320.0), 100.0);
        let events = tick(&mut round, &TickInput::default(), FRAME_MS);
        assert_eq!(round.outcome(), Outcome::Lost);
        assert!(events.contains(&GameEvent::Collision { obstacle_id: id }));
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut round = Round::new(GameConfig::default(), sprites(), 1).unwrap();
        tick(&mut round, &TickInput::default(), FRAME_MS);
        let y = round.balloon.pos.y;
        let frame = round.frame_index;

        let toggle = TickInput {
            pause_toggle: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut round, &toggle, FRAME_MS), vec![GameEvent::Paused]);
        for _ in 0..50 {
            let ascend = TickInput {
                ascend: true,
                ..Default::default()
            };
            assert!(tick(&mut round, &ascend, FRAME_MS).is_empty());
        }
        assert_eq!(round.balloon.pos.y, y);
        assert_eq!(round.frame_index, frame);
        assert!(!round.balloon.is_climbing());

        let events = tick(&mut round, &toggle, FRAME_MS);
        assert_eq!(events[0], GameEvent::Resumed);
        assert!(round.balloon.pos.y > y);
        assert_eq!(round.frame_index, frame + 1);
    }

    #[test]
    fn test_ascend_ignites_burner() {
        let mut round = Round::new(GameConfig::default(), sprites(), 1).unwrap();
        let ascend = TickInput {
            ascend: true,
            ..Default::default()
        };
        let events = tick(&mut round, &ascend, FRAME_MS);
        assert!(events.contains(&GameEvent::BurnerIgnited));

        let mut extinguished = false;
        for _ in 0..30 {
            extinguished |= tick(&mut round, &TickInput::default(), FRAME_MS)
                .contains(&GameEvent::BurnerExtinguished);
        }
        assert!(extinguished);
    }

    #[test]
    fn test_last_pass_wins_and_absorbs() {
        let cfg = GameConfig {
            obstacle_goal: Some(1),
            ..GameConfig::default()
        };
        let mut round = Round::new(cfg, ghost_sprites(), 1).unwrap();
        // Just in front of the player, passed on the first move
        let id = round
            .obstacles
            .push(ObstacleKind::Plane, Vec2::new(52.0, 100.0), 100.0);

        let events = tick(&mut round, &TickInput::default(), FRAME_MS);
        assert!(events.contains(&GameEvent::ObstaclePassed {
            id,
            remaining: Some(0)
        }));
        assert_eq!(events.last(), Some(&GameEvent::RoundWon { passed: 1 }));
        assert_eq!(round.outcome(), Outcome::Won);

        let balloon_y = round.balloon.pos.y;
        let frame = round.frame_index;
        let count = round.obstacles.len();
        for _ in 0..10 {
            let input = TickInput {
                ascend: true,
                pause_toggle: true,
                ..Default::default()
            };
            assert!(tick(&mut round, &input, FRAME_MS).is_empty());
        }
        assert_eq!(round.balloon.pos.y, balloon_y);
        assert_eq!(round.frame_index, frame);
        assert_eq!(round.obstacles.len(), count);
        assert!(!round.paused);
        assert_eq!(round.outcome(), Outcome::Won);
    }

    #[test]
    fn test_collision_beats_goal_pass_on_same_frame() {
        let cfg = GameConfig {
            obstacle_goal: Some(1),
            ..GameConfig::default()
        };
        let mut round = Round::new(cfg, sprites(), 1).unwrap();
        // Passes the player this frame, well clear of the balloon
        round
            .obstacles
            .push(ObstacleKind::Plane, Vec2::new(52.0, 100.0), 100.0);
        // Hits the balloon this frame
        let hit = round
            .obstacles
            .push(ObstacleKind::Saucer, Vec2::new(55.0, 320.0), 100.0);

        let events = tick(&mut round, &TickInput::default(), FRAME_MS);
        assert_eq!(round.outcome(), Outcome::Lost);
        assert_eq!(round.state.obstacles_remaining, Some(1));
        assert_eq!(round.state.passed, 0);
        assert!(events.contains(&GameEvent::Collision { obstacle_id: hit }));
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::RoundWon { .. } | GameEvent::ObstaclePassed { .. }
        )));
    }

    #[test]
    fn test_out_of_bounds_beats_goal_pass_on_same_frame() {
        let cfg = GameConfig {
            obstacle_goal: Some(1),
            ..GameConfig::default()
        };
        let mut round = Round::new(cfg, sprites(), 1).unwrap();
        // One frame of sink takes the balloon past the bottom edge
        round.balloon.pos.y = 729.0;
        round
            .obstacles
            .push(ObstacleKind::Plane, Vec2::new(52.0, 100.0), 100.0);

        let events = tick(&mut round, &TickInput::default(), FRAME_MS);
        assert_eq!(round.outcome(), Outcome::Lost);
        assert_eq!(round.state.obstacles_remaining, Some(1));
        assert!(matches!(events[events.len() - 2], GameEvent::OutOfBounds { .. }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::RoundWon { .. })));
    }

    #[test]
    fn test_full_round_won_after_goal() {
        let mut round = Round::new(GameConfig::default(), ghost_sprites(), 7).unwrap();
        let mut passed_events = 0;
        for _ in 0..6000 {
            let input = autopilot(&round);
            passed_events += tick(&mut round, &input, FRAME_MS)
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
                .count();
            if round.is_over() {
                break;
            }
        }
        assert_eq!(round.outcome(), Outcome::Won);
        assert_eq!(round.state.passed, 10);
        assert_eq!(passed_events, 10);
        assert_eq!(round.state.obstacles_remaining, Some(0));
    }

    #[test]
    fn test_thrust_model_never_loses_on_bounds() {
        let mut cfg = GameConfig::classic();
        cfg.obstacle_kinds = vec![ObstacleKind::Balloon];
        let sheet = SpriteSheet::procedural()
            .unwrap()
            .with_mask(SpriteId::BalloonObstacle, Mask::new(177, 250).unwrap())
            .unwrap();
        let mut round = Round::new(cfg, Arc::new(sheet), 3).unwrap();

        let mut wrapped = false;
        for i in 0..3000 {
            // Alternate long burns and long falls
            let input = TickInput {
                ascend_held: (i / 200) % 2 == 1,
                ..Default::default()
            };
            let before = round.balloon.pos.y;
            tick(&mut round, &input, FRAME_MS);
            wrapped |= (round.balloon.pos.y - before).abs() > 500.0;
        }
        assert!(wrapped);
        assert_eq!(round.outcome(), Outcome::InProgress);
        assert_eq!(round.state.obstacles_remaining, None);
        assert!(round.state.passed > 0);
    }

    #[test]
    fn test_thrust_ignores_discrete_ascend() {
        let mut round = Round::new(GameConfig::classic(), sprites(), 3).unwrap();
        let input = TickInput {
            ascend: true,
            ..Default::default()
        };
        tick(&mut round, &input, FRAME_MS);
        assert!(!round.balloon.is_climbing());
        assert!(!round.balloon.burner_on);
    }

    #[test]
    fn test_quit_flags_round() {
        let mut round = Round::new(GameConfig::default(), sprites(), 1).unwrap();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        assert!(tick(&mut round, &input, FRAME_MS).is_empty());
        assert!(round.quit_requested);
        assert_eq!(round.frame_index, 0);
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut round = Round::new(GameConfig::default(), ghost_sprites(), seed).unwrap();
            let mut events = Vec::new();
            for _ in 0..2000 {
                let input = autopilot(&round);
                events.extend(tick(&mut round, &input, FRAME_MS));
            }
            let positions: Vec<_> = round.obstacles.iter().map(|o| o.pos).collect();
            (events, positions, round.balloon.pos)
        };
        assert_eq!(run(12345), run(12345));
        // A different seed changes spawn heights
        assert_ne!(run(12345).1, run(54321).1);
    }
}
