//! Sky Wars headless host
//!
//! Stands in for the view layer: owns the director, drives it from a frame
//! loop with a fixed-timestep accumulator and routes audio cues.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use sky_wars::consts::*;
use sky_wars::sim::{Director, GameEvent, Outcome, TickInput};
use sky_wars::{AudioManager, LogBackend, Settings, logging};

/// Drag the plane, shoot the monsters
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Settings file (JSON)
    #[arg(long, default_value = "sky-wars.json")]
    settings: PathBuf,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,

    /// Override the scene width from settings
    #[arg(long, value_parser = positive_f32)]
    width: Option<f32>,

    /// Override the scene height from settings
    #[arg(long, value_parser = positive_f32)]
    height: Option<f32>,

    /// Stop each run after this many simulated seconds
    #[arg(long, default_value_t = 120.0, value_parser = positive_f32)]
    seconds: f32,

    /// Host frame time in milliseconds
    #[arg(long, default_value_t = 16.666_667, value_parser = positive_f32)]
    frame_ms: f32,

    /// Number of runs; each restart uses the next seed
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// Let the autopilot drag the player
    #[arg(long)]
    autopilot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Accepts finite numbers greater than zero
fn positive_f32(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|err| format!("{err}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {s}"))
    }
}

/// What the run printed when it finished
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    seconds: f32,
    monsters_destroyed: u32,
    outcome: Option<Outcome>,
    message: Option<&'static str>,
}

/// Host-side game instance
struct Game {
    director: Director,
    audio: AudioManager,
    input: TickInput,
    accumulator: f32,
    ticks: u64,
    monsters_destroyed: u32,
    node_count: usize,
}

impl Game {
    fn new(settings: &Settings, size: Vec2, seed: u64, autopilot: bool) -> Self {
        Self {
            director: Director::new(size, seed),
            audio: AudioManager::from_settings(Box::new(LogBackend), settings),
            input: TickInput {
                autopilot,
                ..Default::default()
            },
            accumulator: 0.0,
            ticks: 0,
            monsters_destroyed: 0,
            node_count: 0,
        }
    }

    /// Present a fresh gameplay scene with the next seed
    fn restart(&mut self) {
        self.director.restart();
        self.input.touches.clear();
        self.accumulator = 0.0;
        self.ticks = 0;
        self.monsters_destroyed = 0;
        self.node_count = 0;
    }

    /// Play until the game-over scene or `seconds`, returning the time played
    fn play(&mut self, frame: f32, seconds: f32, settings: &Settings) -> f32 {
        let mut elapsed = 0.0;
        let mut frames: u64 = 0;

        while elapsed < seconds && self.director.game_over().is_none() {
            self.update(frame);
            elapsed += frame;
            frames += 1;

            // Overlay once a second, like the view's FPS / node counters
            if frames % 60 == 0 && (settings.show_fps || settings.show_node_count) {
                log::debug!(
                    "t={elapsed:.1}s nodes={} kills={}",
                    self.node_count,
                    self.monsters_destroyed
                );
            }
        }
        elapsed
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_TICK_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let events = self.director.update(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.ticks += 1;

            // Touches are delivered once
            self.input.touches.clear();

            for event in events {
                self.dispatch(event);
            }
        }

        if let Some(state) = self.director.game_state() {
            self.node_count = state.entities.len();
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::MusicStarted(track) => self.audio.play_music(track),
            GameEvent::Sound(effect) => self.audio.play(effect),
            GameEvent::MonsterDestroyed { total, .. } => self.monsters_destroyed = total,
            GameEvent::SceneTransition { outcome } => {
                log::info!("Run over: {outcome:?}");
            }
            GameEvent::MonsterSpawned { .. }
            | GameEvent::ProjectileFired { .. }
            | GameEvent::Despawned { .. }
            | GameEvent::PlayerHit => {}
        }
    }

    fn summary(&self, seconds: f32) -> RunSummary {
        let over = self.director.game_over();
        RunSummary {
            seed: self.director.seed(),
            ticks: self.ticks,
            seconds,
            monsters_destroyed: self.monsters_destroyed,
            outcome: over.map(|o| o.outcome),
            message: over.map(|o| o.message()),
        }
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let settings = Settings::load(&args.settings);
    let mut size = settings.scene_size();
    if let Some(width) = args.width {
        size.x = width;
    }
    if let Some(height) = args.height {
        size.y = height;
    }

    if args.save_settings {
        let effective = Settings {
            scene_width: size.x,
            scene_height: size.y,
            ..settings.clone()
        };
        if let Err(err) = effective.save(&args.settings) {
            log::warn!("Failed to save settings to {}: {err}", args.settings.display());
        }
    }

    log::info!("Sky Wars starting ({}x{}, seed {})", size.x, size.y, args.seed);

    let mut game = Game::new(&settings, size, args.seed, args.autopilot);
    let frame = args.frame_ms / 1000.0;

    for run in 0..args.runs {
        if run > 0 {
            game.restart();
        }
        let elapsed = game.play(frame, args.seconds, &settings);

        let summary = game.summary(elapsed);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to serialize summary: {err}"),
        }
    }
}
