//! Periodic spawning of monsters and projectiles
//!
//! Two independent countdown timers drive the spawners. Both fire on the
//! first tick of a scene and then once per interval.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{PhysicsBody, Shape};
use super::category::PhysicsCategory;
use super::motion::{Motion, OnComplete};
use super::state::{Entity, EntityKind, GameEvent, GameState};
use crate::consts::*;

/// Repeating countdown accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatTimer {
    pub interval: f32,
    /// Seconds until the next fire (fires when this reaches zero)
    pub remaining: f32,
}

impl RepeatTimer {
    /// Timer that fires immediately, then every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: 0.0,
        }
    }

    /// Advance by `dt`, returning how many times the timer fired
    ///
    /// At most `MAX_TIMER_CATCH_UP` fires are reported; any backlog beyond
    /// that is dropped and the timer restarts a full interval out.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            // Degenerate interval: fire once per tick rather than spinning
            self.remaining = 0.0;
            return 1;
        }
        // `max` also maps NaN to zero
        self.remaining -= dt.max(0.0);
        if self.remaining > 0.0 {
            return 0;
        }

        let due = (-self.remaining / self.interval).floor() + 1.0;
        if due < MAX_TIMER_CATCH_UP as f32 {
            let fired = due as u32;
            self.remaining += fired as f32 * self.interval;
            fired
        } else {
            self.remaining = self.interval;
            MAX_TIMER_CATCH_UP
        }
    }
}

/// Run both spawners for one tick: monsters first, then shots
pub fn run_spawners(state: &mut GameState, dt: f32) {
    for _ in 0..state.monster_timer.advance(dt) {
        spawn_monster(state);
    }
    for _ in 0..state.shoot_timer.advance(dt) {
        shoot(state);
    }
}

/// Spawn a monster on the top row and send it straight down
pub fn spawn_monster(state: &mut GameState) -> u32 {
    let half_width = MONSTER_SIZE.x * 0.5;
    let actual_x = state.random_range(half_width, state.size.x - half_width);
    let actual_y = state.size.y - MONSTER_SIZE.y;
    let start = Vec2::new(actual_x, actual_y);

    let duration = state.random_range(MONSTER_MIN_DURATION, MONSTER_MAX_DURATION);
    let end = Vec2::new(actual_x, -MONSTER_SIZE.y * 0.5);

    let id = state.next_entity_id();
    let body = PhysicsBody::sensor(
        Shape::rect(MONSTER_SIZE),
        PhysicsCategory::Monster,
        PhysicsCategory::Projectile,
    );
    let mut monster = Entity::new(id, EntityKind::Monster, start, MONSTER_SIZE).with_body(body);
    monster.motion = Motion::move_to(start, end, duration, OnComplete::Remove);
    state.add_entity(monster);

    log::debug!("Monster {id} spawned at x={actual_x:.1}, descending over {duration:.2}s");
    state.push_event(GameEvent::MonsterSpawned {
        id,
        pos: start,
        duration,
    });
    id
}

/// Fire a projectile from the player's current position
///
/// Returns `None` once the player has left the scene.
pub fn shoot(state: &mut GameState) -> Option<u32> {
    let origin = state.player()?.pos;
    // Destination is the origin plus (x, range): a long shot upward that
    // drifts sideways with the player's x
    let dest = Vec2::new(origin.x, PROJECTILE_RANGE) + origin;

    let id = state.next_entity_id();
    let body = PhysicsBody::sensor(
        Shape::circle(PROJECTILE_SIZE),
        PhysicsCategory::Projectile,
        PhysicsCategory::Monster,
    )
    .with_precise_collision();
    let mut projectile =
        Entity::new(id, EntityKind::Projectile, origin, PROJECTILE_SIZE).with_body(body);
    projectile.motion = Motion::move_to(origin, dest, PROJECTILE_DURATION, OnComplete::Remove);
    state.add_entity(projectile);

    state.push_event(GameEvent::ProjectileFired { id, pos: origin });
    Some(id)
}
