//! Game state and core simulation types
//!
//! The gameplay scene owns every entity and the kill counter. Nothing here
//! outlives the scene: a committed transition freezes it and the host drops it.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{PhysicsBody, Shape};
use super::category::PhysicsCategory;
use super::motion::Motion;
use super::scene::Outcome;
use super::spawn::RepeatTimer;
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::*;

/// Entity variants living in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Monster,
    Projectile,
}

/// A sprite node plus its physics body
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Center position in scene coordinates (origin bottom-left, y up)
    pub pos: Vec2,
    /// Position at the start of the current step (for swept contacts)
    pub prev_pos: Vec2,
    pub size: Vec2,
    pub body: Option<PhysicsBody>,
    pub motion: Motion,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            prev_pos: pos,
            size,
            body: None,
            motion: Motion::Done,
        }
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn category(&self) -> PhysicsCategory {
        self.body
            .as_ref()
            .map_or(PhysicsCategory::None, |b| b.category)
    }
}

/// Notifications for the host (renderer, audio, scene presenter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MusicStarted(MusicTrack),
    MonsterSpawned { id: u32, pos: Vec2, duration: f32 },
    ProjectileFired { id: u32, pos: Vec2 },
    /// Entity left the scene (finished its motion or was destroyed)
    Despawned { id: u32, kind: EntityKind },
    MonsterDestroyed { id: u32, total: u32 },
    PlayerHit,
    Sound(SoundEffect),
    SceneTransition { outcome: Outcome },
}

/// Complete gameplay scene state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Scene size in points
    pub size: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Projectile-monster kills this run
    pub monsters_destroyed: u32,
    /// Scene children (sorted by id for determinism)
    pub entities: Vec<Entity>,
    pub player_id: u32,
    pub monster_timer: RepeatTimer,
    pub shoot_timer: RepeatTimer,
    /// Pairs touching at the end of the last step, for contact-begin filtering
    pub(crate) touching: BTreeSet<(u32, u32)>,
    /// Transition requested during the current step
    pending: Option<Outcome>,
    /// Committed transition; the scene is frozen once this is set
    transition: Option<Outcome>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new scene of the given size with the given seed
    pub fn new(seed: u64, size: Vec2) -> Self {
        Self::with_rng(seed, size, Pcg32::seed_from_u64(seed))
    }

    /// Create a new scene drawing randomness from `rng`
    pub fn with_rng(seed: u64, size: Vec2, rng: Pcg32) -> Self {
        let mut state = Self {
            seed,
            rng,
            size,
            time_ticks: 0,
            monsters_destroyed: 0,
            entities: Vec::new(),
            player_id: 0,
            monster_timer: RepeatTimer::new(MONSTER_SPAWN_INTERVAL),
            shoot_timer: RepeatTimer::new(SHOOT_INTERVAL),
            touching: BTreeSet::new(),
            pending: None,
            transition: None,
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_player();
        state.events.push(GameEvent::MusicStarted(MusicTrack::Background));
        log::info!("Scene started: {}x{} seed={}", size.x, size.y, seed);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in `[min, max)`
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random::<f32>() * (max - min) + min
    }

    fn spawn_player(&mut self) {
        let id = self.next_entity_id();
        let pos = Vec2::new(self.size.x * 0.5 - PLAYER_SIZE.x * 0.5, PLAYER_START_Y);
        let body = PhysicsBody::sensor(
            Shape::rect(PLAYER_SIZE),
            PhysicsCategory::Player,
            PhysicsCategory::Monster,
        );
        self.entities
            .push(Entity::new(id, EntityKind::Player, pos, PLAYER_SIZE).with_body(body));
        self.player_id = id;
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The player, while it is still in the scene
    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player_id;
        self.entity_mut(id)
    }

    /// Live entities of one kind
    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Add a child to the scene (keeps id order since ids only grow)
    pub fn add_entity(&mut self, entity: Entity) {
        debug_assert!(self.entities.last().is_none_or(|e| e.id < entity.id));
        self.entities.push(entity);
    }

    /// Remove an entity from the scene and its physics world in one step
    pub fn remove_entity(&mut self, id: u32) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let entity = self.entities.remove(idx);
        self.touching.retain(|&(a, b)| a != id && b != id);
        self.events.push(GameEvent::Despawned {
            id,
            kind: entity.kind,
        });
        Some(entity)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ask the host to leave this scene
    ///
    /// Within one step a loss overrides a win. After a transition is committed
    /// further requests are ignored.
    pub fn request_transition(&mut self, outcome: Outcome) {
        if let Some(committed) = self.transition {
            log::debug!("Ignoring {outcome:?} request, already {committed:?}");
            return;
        }
        self.pending = match (self.pending, outcome) {
            (Some(Outcome::Lost), _) => Some(Outcome::Lost),
            (_, requested) => Some(requested),
        };
    }

    /// Commit this step's transition request, emitting a single event
    pub fn commit_transition(&mut self) -> Option<Outcome> {
        let outcome = self.pending.take()?;
        if self.transition.is_some() {
            return None;
        }
        self.transition = Some(outcome);
        self.events.push(GameEvent::SceneTransition { outcome });
        log::info!(
            "Transition requested: {:?} after {} kills",
            outcome,
            self.monsters_destroyed
        );
        Some(outcome)
    }

    /// Request raised during the current step, not yet committed
    pub fn pending_outcome(&self) -> Option<Outcome> {
        self.pending
    }

    /// Committed outcome of this scene
    pub fn outcome(&self) -> Option<Outcome> {
        self.transition
    }

    pub fn is_over(&self) -> bool {
        self.transition.is_some()
    }
}
