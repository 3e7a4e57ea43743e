//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or audio dependencies (effects are emitted as events)

pub mod body;
pub mod category;
pub mod collision;
pub mod input;
pub mod motion;
pub mod scene;
pub mod sdf;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::{PhysicsBody, Shape};
pub use category::{ContactKind, PhysicsCategory};
pub use collision::{detect_contacts, resolve_contact, resolve_contacts};
pub use input::{DragState, InputController, TouchEvent, TouchPhase, autopilot};
pub use motion::{Motion, MotionStep, OnComplete};
pub use scene::{Director, GameOverScene, Outcome, Scene, Transition};
pub use spawn::{RepeatTimer, shoot, spawn_monster};
pub use state::{Entity, EntityKind, GameEvent, GameState};
pub use tick::{TickInput, tick};
