//! Flappy Balloon headless driver
//!
//! Runs the simulation without a window: an autopilot flies the balloon and
//! each round's result is printed.
//!
//! # Usage
//!
//! ```bash
//! # One skies round as fast as possible
//! flappy-balloon
//!
//! # Three classic rounds paced at 60 fps, JSON summaries
//! flappy-balloon --edition classic --rounds 3 --realtime --json
//!
//! # Custom config with a fixed seed
//! flappy-balloon --config balloon.json --seed 42
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use flappy_balloon::frame::RenderFrame;
use flappy_balloon::sim::{Balloon, GameEvent, Obstacle, Outcome, Round, SpriteSheet, TickInput};
use flappy_balloon::{
    ConfigError, Edition, FixedClock, FrameClock, GameConfig, PhysicsModel, Presenter,
    RealtimeClock, RoundSummary, Session, StartupError,
};

/// Flappy Balloon simulation
#[derive(Parser, Debug)]
#[command(name = "flappy-balloon")]
#[command(author, version, about = "Headless Flappy Balloon simulation", long_about = None)]
struct Cli {
    /// JSON config file (fields not given take the edition's values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Edition preset: classic or skies (a config file's own edition wins)
    #[arg(short, long)]
    edition: Option<String>,

    /// Session seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rounds to play
    #[arg(short, long, default_value = "1")]
    rounds: u32,

    /// Give up on a round after this many simulated seconds
    #[arg(long, default_value = "300")]
    max_seconds: f32,

    /// Pace frames in real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print round summaries as JSON lines
    #[arg(long)]
    json: bool,
}

/// Flies toward the gap beside the next obstacle
struct Autopilot {
    json: bool,
    frames: u64,
    collisions: u32,
}

impl Autopilot {
    fn next_threat(round: &Round) -> Option<&Obstacle> {
        let player_x = round.balloon.pos.x;
        round
            .obstacles
            .iter()
            .find(|o| !o.passed && o.right() > player_x)
    }

    /// Balloon top edge to aim for
    fn target_y(round: &Round) -> f32 {
        let field_h = round.config.field_height;
        let balloon_h = Balloon::HEIGHT;
        let centre = field_h / 2.0 - balloon_h / 2.0;
        let target = match Self::next_threat(round) {
            Some(o) if o.sprite_pos().y + o.kind.height() / 2.0 < field_h / 2.0 => {
                o.sprite_pos().y + o.kind.height() + 40.0
            }
            Some(o) => o.sprite_pos().y - balloon_h - 40.0,
            None => centre,
        };
        target.clamp(20.0, field_h - balloon_h - 20.0)
    }
}

impl Presenter for Autopilot {
    fn poll_input(&mut self, round: &Round) -> TickInput {
        let target = Self::target_y(round);
        let balloon = &round.balloon;
        match round.config.physics {
            PhysicsModel::EasedClimb { .. } => TickInput {
                ascend: balloon.pos.y > target && !balloon.is_climbing(),
                ..Default::default()
            },
            PhysicsModel::ThrustWrap { .. } => TickInput {
                ascend_held: (balloon.pos.y > target && balloon.velocity > -120.0)
                    || balloon.velocity > 240.0,
                ..Default::default()
            },
        }
    }

    fn render(&mut self, _frame: &RenderFrame) {
        self.frames += 1;
    }

    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::Collision { obstacle_id } = event {
            self.collisions += 1;
            log::debug!("Autopilot hit obstacle #{}", obstacle_id);
        }
    }

    fn round_over(&mut self, summary: &RoundSummary) -> bool {
        if self.json {
            match serde_json::to_string(summary) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("Could not encode summary: {}", e),
            }
        } else {
            println!(
                "round {:>2}  seed {:<20}  {:<11}  passed {:>3}  frames {:>6}  ({:.1}s)",
                summary.round + 1,
                summary.seed,
                summary.outcome.as_str(),
                summary.passed,
                summary.frames,
                summary.elapsed_ms / 1000.0
            );
        }
        true
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let edition = match &cli.edition {
        Some(name) => {
            Edition::from_str(name).ok_or_else(|| ConfigError::UnknownEdition(name.clone()))?
        }
        None => Edition::default(),
    };

    match &cli.config {
        Some(path) => GameConfig::load(path, edition),
        None => Ok(GameConfig::for_edition(edition)),
    }
}

fn run(cli: Cli) -> Result<(), StartupError> {
    let config = load_config(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let frame_rate = config.frame_rate;
    let max_frames = (cli.max_seconds.max(0.0) * frame_rate as f32) as u64;

    log::info!(
        "Flappy Balloon ({} edition) starting: {} round(s), seed {}",
        config.edition.as_str(),
        cli.rounds,
        seed
    );

    let sprites = SpriteSheet::procedural()?;
    let session = Session::new(config, sprites, seed)?.with_frame_limit(max_frames.max(1));

    let mut presenter = Autopilot {
        json: cli.json,
        frames: 0,
        collisions: 0,
    };
    let mut clock: Box<dyn FrameClock> = if cli.realtime {
        Box::new(RealtimeClock::new(frame_rate))
    } else {
        Box::new(FixedClock::new(frame_rate))
    };

    let summaries = session.run(&mut presenter, clock.as_mut(), Some(cli.rounds));
    let won = summaries
        .iter()
        .filter(|s| s.outcome == Outcome::Won)
        .count();
    log::info!(
        "Session over: {}/{} rounds won, {} frames rendered, {} collisions",
        won,
        summaries.len(),
        presenter.frames,
        presenter.collisions
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
