//! Fixed timestep simulation tick
//!
//! Core game loop that advances a gameplay scene deterministically. Order per
//! tick: queued touches, spawners, scripted motion, contacts, transition.

use super::collision::resolve_contacts;
use super::input::{InputController, TouchEvent, autopilot};
use super::motion::MotionStep;
use super::spawn::run_spawners;
use super::state::GameState;
use crate::consts::MAX_TICK_DT;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch events delivered since the previous tick, in arrival order
    pub touches: Vec<TouchEvent>,
    /// Demo mode - the player is dragged automatically
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
///
/// `dt` is clamped to `[0, MAX_TICK_DT]`; NaN counts as zero.
pub fn tick(state: &mut GameState, controller: &mut InputController, input: &TickInput, dt: f32) {
    // A committed transition freezes the scene until the host replaces it
    if state.is_over() {
        return;
    }
    let dt = if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, MAX_TICK_DT)
    };

    state.time_ticks += 1;

    for event in &input.touches {
        controller.handle(state, event);
    }
    if input.autopilot {
        for event in autopilot(state, controller) {
            controller.handle(state, &event);
        }
    }

    run_spawners(state, dt);
    advance_motion(state, dt);
    resolve_contacts(state);

    state.commit_transition();
}

/// Advance every scripted motion, despawning entities whose motion finished
fn advance_motion(state: &mut GameState, dt: f32) {
    let mut finished = Vec::new();

    for entity in &mut state.entities {
        entity.prev_pos = entity.pos;
        match entity.motion.advance(dt) {
            MotionStep::Idle => {}
            MotionStep::Moving(pos) | MotionStep::Arrived(pos) => entity.pos = pos,
            MotionStep::Remove => finished.push(entity.id),
        }
    }

    for id in finished {
        state.remove_entity(id);
    }
}
