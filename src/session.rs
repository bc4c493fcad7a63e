//! Session loop
//!
//! Drives rounds one after another: poll input, tick, render, repeat until the
//! round ends, then ask the presenter whether to play again. Timing comes from
//! a `FrameClock` so the same loop runs in real time or as fast as possible.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::frame::RenderFrame;
use crate::sim::{GameEvent, Outcome, Round, SpriteSheet, TickInput, tick};

/// Longest frame the realtime clock will report
pub const MAX_FRAME_MS: f32 = 250.0;

/// Supplies elapsed milliseconds per frame
pub trait FrameClock {
    /// Block until the next frame is due (if the clock paces) and return the
    /// milliseconds since the previous frame
    fn next_frame(&mut self) -> f32;
}

/// Fixed step, no waiting
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    frame_ms: f32,
}

impl FixedClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_ms: 1000.0 / frame_rate.max(1) as f32,
        }
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> f32 {
        self.frame_ms
    }
}

/// Wall-clock pacing at a target frame rate
#[derive(Debug)]
pub struct RealtimeClock {
    target: Duration,
    last: Instant,
}

impl RealtimeClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            target: Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64),
            last: Instant::now(),
        }
    }
}

impl FrameClock for RealtimeClock {
    fn next_frame(&mut self) -> f32 {
        let due = self.last + self.target;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        (elapsed.as_secs_f32() * 1000.0).min(MAX_FRAME_MS)
    }
}

/// The outside world: input, drawing, sound
pub trait Presenter {
    /// Input for the coming tick
    fn poll_input(&mut self, round: &Round) -> TickInput;

    /// Draw the state after a tick
    fn render(&mut self, frame: &RenderFrame);

    /// React to something that happened (sounds, effects)
    fn on_event(&mut self, _event: &GameEvent) {}

    /// The round is over; return true to play another
    fn round_over(&mut self, summary: &RoundSummary) -> bool;
}

/// How a round went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    /// 0-based round number within the session
    pub round: u32,
    pub seed: u64,
    pub outcome: Outcome,
    pub passed: u32,
    pub frames: u64,
    pub elapsed_ms: f64,
    /// Ended by a quit request rather than by winning or losing
    pub quit: bool,
}

/// A sequence of rounds with one configuration
pub struct Session {
    config: GameConfig,
    sprites: Arc<SpriteSheet>,
    seed: u64,
    max_frames: Option<u64>,
}

impl Session {
    /// Validates `config` up front so no round ever starts with a bad one
    pub fn new(config: GameConfig, sprites: SpriteSheet, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sprites: Arc::new(sprites),
            seed,
            max_frames: None,
        })
    }

    /// Stop any round after this many simulated frames
    pub fn with_frame_limit(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Each round gets its own seed derived from the session seed
    pub fn round_seed(&self, round: u32) -> u64 {
        self.seed.wrapping_add(round as u64)
    }

    /// Play one round to completion, quit or the frame limit
    pub fn play_round<P, C>(&self, index: u32, presenter: &mut P, clock: &mut C) -> RoundSummary
    where
        P: Presenter + ?Sized,
        C: FrameClock + ?Sized,
    {
        let mut round = Round::from_validated(
            self.config.clone(),
            Arc::clone(&self.sprites),
            self.round_seed(index),
        );
        presenter.render(&RenderFrame::capture(&round));

        loop {
            let input = presenter.poll_input(&round);
            let elapsed_ms = clock.next_frame();
            for event in tick(&mut round, &input, elapsed_ms) {
                presenter.on_event(&event);
            }
            presenter.render(&RenderFrame::capture(&round));

            if round.quit_requested {
                if !round.is_over() {
                    log::warn!("Quit requested mid-round after {} frames", round.frame_index);
                }
                break;
            }
            if round.is_over() {
                break;
            }
            if self.max_frames.is_some_and(|max| round.frame_index >= max) {
                log::info!("Round {} hit the frame limit", index);
                break;
            }
        }

        let summary = RoundSummary {
            round: index,
            seed: round.seed,
            outcome: round.outcome(),
            passed: round.state.passed,
            frames: round.frame_index,
            elapsed_ms: round.elapsed_ms,
            quit: round.quit_requested,
        };
        log::info!(
            "Round {} finished: {} with {} passes in {} frames",
            index,
            summary.outcome.as_str(),
            summary.passed,
            summary.frames
        );
        summary
    }

    /// Play rounds until the presenter declines, quits, or `max_rounds` is reached
    pub fn run<P, C>(
        &self,
        presenter: &mut P,
        clock: &mut C,
        max_rounds: Option<u32>,
    ) -> Vec<RoundSummary>
    where
        P: Presenter + ?Sized,
        C: FrameClock + ?Sized,
    {
        let mut summaries = Vec::new();
        for index in 0.. {
            if max_rounds.is_some_and(|max| index >= max) {
                break;
            }
            let summary = self.play_round(index, presenter, clock);
            let quit = summary.quit;
            let again = presenter.round_over(&summary);
            summaries.push(summary);
            if quit || !again {
                break;
            }
        }
        summaries
    }
}
