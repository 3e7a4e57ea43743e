//! Contact detection and resolution
//!
//! Detection reports contact-begin pairs (bodies that touch this step but did
//! not touch at the end of the previous one). Resolution orders each pair by
//! category, dispatches to the outcome handler and removes the entities. A
//! pair whose entities are already gone is stale and resolves to nothing.

use std::collections::BTreeSet;

use super::body::{Placed, bodies_touch};
use super::category::ContactKind;
use super::scene::Outcome;
use super::state::{EntityKind, GameEvent, GameState};
use crate::consts::WIN_KILL_THRESHOLD;

/// Pair of entity ids, smaller id first
pub type ContactPair = (u32, u32);

/// Find pairs that started touching this step, in ascending id order
pub fn detect_contacts(state: &mut GameState) -> Vec<ContactPair> {
    let mut touching = BTreeSet::new();

    for (i, a) in state.entities.iter().enumerate() {
        let Some(body_a) = a.body.as_ref() else { continue };
        for b in &state.entities[i + 1..] {
            let Some(body_b) = b.body.as_ref() else { continue };
            if !body_a.wants_contact(body_b) {
                continue;
            }
            let placed_a = Placed {
                body: body_a,
                pos: a.pos,
                prev_pos: a.prev_pos,
            };
            let placed_b = Placed {
                body: body_b,
                pos: b.pos,
                prev_pos: b.prev_pos,
            };
            if bodies_touch(placed_a, placed_b) {
                touching.insert((a.id.min(b.id), a.id.max(b.id)));
            }
        }
    }

    let began: Vec<ContactPair> = touching.difference(&state.touching).copied().collect();
    state.touching = touching;
    began
}

/// Resolve one contact between entities `a` and `b`
///
/// Returns the kind of contact handled, or `None` if either entity has
/// already left the scene.
pub fn resolve_contact(state: &mut GameState, a: u32, b: u32) -> Option<ContactKind> {
    let first = state.entity(a)?;
    let second = state.entity(b)?;

    let kind = ContactKind::classify(first.category(), second.category());
    match kind {
        ContactKind::ProjectileHitMonster => {
            let (projectile, monster) = if first.kind == EntityKind::Projectile {
                (a, b)
            } else {
                (b, a)
            };
            projectile_did_collide_with_monster(state, projectile, monster);
        }
        ContactKind::MonsterHitPlayer => {
            let (player, monster) = if first.kind == EntityKind::Player {
                (a, b)
            } else {
                (b, a)
            };
            player_did_collide_with_monster(state, player, monster);
        }
        ContactKind::Ignored => {}
    }
    Some(kind)
}

/// Detect and resolve every contact that began this step
pub fn resolve_contacts(state: &mut GameState) {
    for (a, b) in detect_contacts(state) {
        resolve_contact(state, a, b);
    }
}

fn projectile_did_collide_with_monster(state: &mut GameState, projectile: u32, monster: u32) {
    state.remove_entity(projectile);
    state.remove_entity(monster);

    state.monsters_destroyed += 1;
    let total = state.monsters_destroyed;
    log::debug!("Hit: monster {monster} destroyed ({total} total)");
    state.push_event(GameEvent::MonsterDestroyed { id: monster, total });

    if total > WIN_KILL_THRESHOLD {
        state.request_transition(Outcome::Won);
    }
}

fn player_did_collide_with_monster(state: &mut GameState, player: u32, monster: u32) {
    state.remove_entity(player);
    state.remove_entity(monster);

    log::debug!("Hit: player struck by monster {monster}");
    state.push_event(GameEvent::PlayerHit);
    state.request_transition(Outcome::Lost);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::{shoot, spawn_monster};
    use glam::Vec2;

    fn scene() -> GameState {
        let mut state =
            GameState::new(11, Vec2::new(DEFAULT_SCENE_WIDTH, DEFAULT_SCENE_HEIGHT));
        state.drain_events();
        state
    }

    /// Spawn a monster and a projectile, returning (projectile, monster)
    fn kill_pair(state: &mut GameState) -> (u32, u32) {
        let monster = spawn_monster(state);
        let projectile = shoot(state).expect("player alive");
        (projectile, monster)
    }

    #[test]
    fn test_projectile_hit_removes_both_and_counts() {
        let mut state = scene();
        let (projectile, monster) = kill_pair(&mut state);

        assert_eq!(
            resolve_contact(&mut state, projectile, monster),
            Some(ContactKind::ProjectileHitMonster)
        );
        assert!(state.entity(projectile).is_none());
        assert!(state.entity(monster).is_none());
        assert_eq!(state.monsters_destroyed, 1);
        assert_eq!(state.pending_outcome(), None);
    }

    #[test]
    fn test_contact_is_idempotent() {
        let mut state = scene();
        let (projectile, monster) = kill_pair(&mut state);

        resolve_contact(&mut state, monster, projectile);
        assert_eq!(resolve_contact(&mut state, monster, projectile), None);
        assert_eq!(resolve_contact(&mut state, projectile, monster), None);
        assert_eq!(state.monsters_destroyed, 1);
    }

    #[test]
    fn test_thirty_one_kills_win_once() {
        let mut state = scene();
        for i in 1..=31 {
            let (projectile, monster) = kill_pair(&mut state);
            resolve_contact(&mut state, projectile, monster);
            if i <= 30 {
                assert_eq!(state.pending_outcome(), None, "kill {i} should not win");
            }
        }
        assert_eq!(state.monsters_destroyed, 31);
        assert_eq!(state.commit_transition(), Some(Outcome::Won));

        // Further kills are still counted but never re-trigger the transition
        let (projectile, monster) = kill_pair(&mut state);
        resolve_contact(&mut state, projectile, monster);
        assert_eq!(state.commit_transition(), None);

        let wins = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SceneTransition { .. }))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_monster_hits_player_loses_regardless_of_score() {
        let mut state = scene();
        state.monsters_destroyed = 25;
        let monster = spawn_monster(&mut state);
        let player = state.player_id;

        assert_eq!(
            resolve_contact(&mut state, monster, player),
            Some(ContactKind::MonsterHitPlayer)
        );
        assert!(state.player().is_none());
        assert!(state.entity(monster).is_none());
        assert_eq!(state.pending_outcome(), Some(Outcome::Lost));
        assert_eq!(state.monsters_destroyed, 25);
    }

    #[test]
    fn test_projectile_player_pair_is_ignored() {
        let mut state = scene();
        let projectile = shoot(&mut state).expect("player alive");
        let player = state.player_id;

        assert_eq!(
            resolve_contact(&mut state, projectile, player),
            Some(ContactKind::Ignored)
        );
        assert!(state.entity(projectile).is_some());
        assert!(state.player().is_some());
        assert_eq!(state.pending_outcome(), None);

        // And they are never even reported: the projectile starts inside the player
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_detect_reports_begin_only() {
        let mut state = scene();
        let monster = spawn_monster(&mut state);
        let player_pos = state.player().expect("player").pos;
        let m = state.entity_mut(monster).expect("monster");
        m.pos = player_pos;
        m.prev_pos = player_pos;

        let player = state.player_id;
        assert_eq!(detect_contacts(&mut state), vec![(player, monster)]);
        assert!(detect_contacts(&mut state).is_empty());
    }

    #[test]
    fn test_monster_hit_by_two_projectiles_counts_once() {
        let mut state = scene();
        let monster = spawn_monster(&mut state);
        let target = Vec2::new(200.0, 400.0);
        state.entity_mut(monster).expect("monster").pos = target;
        state.player_mut().expect("player").pos = target;
        let first = shoot(&mut state).expect("player alive");
        let second = shoot(&mut state).expect("player alive");
        // Keep the player out of the way
        state.player_mut().expect("player").pos = Vec2::new(20.0, 20.0);

        resolve_contacts(&mut state);
        assert_eq!(state.monsters_destroyed, 1);
        assert!(state.entity(first).is_none());
        assert!(state.entity(second).is_some());
    }
}
