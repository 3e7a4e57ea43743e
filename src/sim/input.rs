//! Touch-driven player control
//!
//! A drag starts on a touch-begin close to the player on either axis, moves
//! the player toward each dragged location and ends on touch-end. Only the
//! player's position target and the drag flag are ever mutated here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, OnComplete};
use super::state::{EntityKind, GameEvent, GameState};
use super::vector::{normalized, subtract};
use crate::audio::SoundEffect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One touch callback: the phase plus every touch location in scene space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<Vec2>,
}

impl TouchEvent {
    pub fn began(at: Vec2) -> Self {
        Self {
            phase: TouchPhase::Began,
            touches: vec![at],
        }
    }

    pub fn moved(to: Vec2) -> Self {
        Self {
            phase: TouchPhase::Moved,
            touches: vec![to],
        }
    }

    pub fn ended() -> Self {
        Self {
            phase: TouchPhase::Ended,
            touches: Vec::new(),
        }
    }

    /// The touch the controller acts on
    pub fn first(&self) -> Option<Vec2> {
        self.touches.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Per-scene input state, passed explicitly into each update
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pub state: DragState,
    /// Unit direction from the player to the last dragged touch
    pub last_direction: Vec2,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Whether a touch-begin at `touch` grabs a player at `player`
    ///
    /// Either axis being within range is enough.
    pub fn grabs(touch: Vec2, player: Vec2) -> bool {
        (touch.x - player.x).abs() < TOUCH_GRAB_DISTANCE
            || (touch.y - player.y).abs() < TOUCH_GRAB_DISTANCE
    }

    /// Apply one touch event to the scene
    pub fn handle(&mut self, state: &mut GameState, event: &TouchEvent) {
        match event.phase {
            TouchPhase::Began => self.touch_began(state, event),
            TouchPhase::Moved => self.touch_moved(state, event),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.state = DragState::Idle;
            }
        }
    }

    fn touch_began(&mut self, state: &GameState, event: &TouchEvent) {
        let Some(touch) = event.first() else { return };
        let Some(player) = state.player() else { return };
        if Self::grabs(touch, player.pos) {
            log::trace!("Drag started at ({:.1}, {:.1})", touch.x, touch.y);
            self.state = DragState::Dragging;
        }
    }

    fn touch_moved(&mut self, state: &mut GameState, event: &TouchEvent) {
        if !self.is_dragging() {
            return;
        }
        let Some(touch) = event.first() else { return };
        let Some(player) = state.player_mut() else { return };

        // Movement targets the raw touch point; the direction is informational
        self.last_direction = normalized(subtract(touch, player.pos));
        player.motion = Motion::move_to(player.pos, touch, PLAYER_MOVE_DURATION, OnComplete::Hold);
        log::trace!(
            "Player moving to ({:.1}, {:.1}) dir=({:.2}, {:.2})",
            touch.x,
            touch.y,
            self.last_direction.x,
            self.last_direction.y
        );

        state.push_event(GameEvent::Sound(SoundEffect::Pew));
    }
}

/// Synthesize touches that line the player up with the lowest live monster
///
/// Used by the demo host. Shots drift sideways by their launch x over their
/// flight, so the aim point leads the monster toward the left. A new drag is
/// issued only when the previous move has settled so the sound cue is not
/// replayed every tick.
pub fn autopilot(state: &GameState, controller: &InputController) -> Vec<TouchEvent> {
    let Some(player) = state.player() else {
        return Vec::new();
    };
    if player.motion.is_active() {
        return Vec::new();
    }

    let target = state
        .iter_kind(EntityKind::Monster)
        .filter(|m| m.pos.y > player.pos.y)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    let Some(target) = target else {
        return Vec::new();
    };

    let shot_speed = PROJECTILE_RANGE / PROJECTILE_DURATION;
    let fall_speed = match target.motion {
        Motion::Active {
            start,
            end,
            duration,
            ..
        } if duration > 0.0 => (start.y - end.y) / duration,
        _ => 0.0,
    };
    let flight = (target.pos.y - player.pos.y) / (shot_speed + fall_speed);
    let aim_x = target.pos.x / (1.0 + flight / PROJECTILE_DURATION);
    if (aim_x - player.pos.x).abs() < 1.0 {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(2);
    if !controller.is_dragging() {
        events.push(TouchEvent::began(player.pos));
    }
    events.push(TouchEvent::moved(Vec2::new(aim_x, player.pos.y)));
    events
}
