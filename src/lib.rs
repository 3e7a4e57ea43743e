//! Sky Wars - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, input, contacts, scenes)
//! - `audio`: Audio engine contract (music loop, one-shot effects)
//! - `settings`: Player-facing configuration loaded from JSON
//! - `logging`: Logger setup for the host binary

pub mod audio;
pub mod logging;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, LogBackend, MusicTrack, SoundEffect};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest step a single tick will simulate
    pub const MAX_TICK_DT: f32 = 0.1;
    /// Most fires a repeating timer reports for one tick
    pub const MAX_TIMER_CATCH_UP: u32 = 8;

    /// Default viewport (portrait phone, points)
    pub const DEFAULT_SCENE_WIDTH: f32 = 375.0;
    pub const DEFAULT_SCENE_HEIGHT: f32 = 667.0;

    /// Player sprite
    pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    /// Player spawn row (distance of the sprite center from the bottom edge)
    pub const PLAYER_START_Y: f32 = 30.0;
    /// Duration of the animated move toward a dragged touch
    pub const PLAYER_MOVE_DURATION: f32 = 0.2;
    /// Per-axis distance under which a touch-begin grabs the player
    pub const TOUCH_GRAB_DISTANCE: f32 = 20.0;

    /// Monster sprite
    pub const MONSTER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    /// Seconds between monster spawns
    pub const MONSTER_SPAWN_INTERVAL: f32 = 1.0;
    /// Descent duration bounds (seconds)
    pub const MONSTER_MIN_DURATION: f32 = 4.0;
    pub const MONSTER_MAX_DURATION: f32 = 6.0;

    /// Projectile sprite (circle body of radius height / 2)
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(10.0, 10.0);
    /// Seconds between shots
    pub const SHOOT_INTERVAL: f32 = 0.2;
    /// Vertical reach of a shot
    pub const PROJECTILE_RANGE: f32 = 1000.0;
    /// Flight time of a shot (seconds)
    pub const PROJECTILE_DURATION: f32 = 2.0;

    /// Kills needed to win: the run is won once the count exceeds this
    pub const WIN_KILL_THRESHOLD: u32 = 30;

    /// Duration of the flip transition to the game-over scene
    pub const TRANSITION_DURATION: f32 = 0.5;
}
