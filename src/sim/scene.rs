//! Scene lifecycle
//!
//! The `Director` stands in for the host's scene presenter: it ticks the
//! gameplay scene and, once that scene commits an outcome, discards it and
//! presents the terminal game-over scene with a flip transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputController;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::consts::TRANSITION_DURATION;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Visual effect used when swapping scenes (rendered by the host)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    None,
    FlipHorizontal { duration: f32 },
}

/// Terminal win/lose screen
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverScene {
    pub size: Vec2,
    pub outcome: Outcome,
}

impl GameOverScene {
    pub fn new(size: Vec2, outcome: Outcome) -> Self {
        Self { size, outcome }
    }

    pub fn won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn message(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "You Won!",
            Outcome::Lost => "You Lose :[",
        }
    }
}

/// A gameplay scene together with the input state scoped to it
#[derive(Debug, Clone)]
pub struct Gameplay {
    pub state: GameState,
    pub controller: InputController,
}

#[derive(Debug, Clone)]
pub enum Scene {
    Gameplay(Box<Gameplay>),
    GameOver(GameOverScene),
}

/// Owns the presented scene and swaps it on transition
#[derive(Debug)]
pub struct Director {
    scene: Scene,
    size: Vec2,
    seed: u64,
    last_transition: Transition,
}

impl Director {
    /// Present a fresh gameplay scene of the given size
    pub fn new(size: Vec2, seed: u64) -> Self {
        Self {
            scene: Self::gameplay(size, seed),
            size,
            seed,
            last_transition: Transition::None,
        }
    }

    fn gameplay(size: Vec2, seed: u64) -> Scene {
        Scene::Gameplay(Box::new(Gameplay {
            state: GameState::new(seed, size),
            controller: InputController::new(),
        }))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Transition used for the most recent scene swap
    pub fn last_transition(&self) -> Transition {
        self.last_transition
    }

    /// The gameplay state, while gameplay is presented
    pub fn game_state(&self) -> Option<&GameState> {
        match &self.scene {
            Scene::Gameplay(gameplay) => Some(&gameplay.state),
            Scene::GameOver(_) => None,
        }
    }

    /// The terminal scene, once presented
    pub fn game_over(&self) -> Option<&GameOverScene> {
        match &self.scene {
            Scene::Gameplay(_) => None,
            Scene::GameOver(over) => Some(over),
        }
    }

    /// Replace the current scene
    pub fn present(&mut self, scene: Scene, transition: Transition) {
        self.scene = scene;
        self.last_transition = transition;
    }

    /// Advance the presented scene by one tick, returning its events
    ///
    /// When gameplay commits an outcome the gameplay scene is dropped here and
    /// the game-over scene takes its place.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let Scene::Gameplay(gameplay) = &mut self.scene else {
            return Vec::new();
        };
        let Gameplay { state, controller } = gameplay.as_mut();
        tick(state, controller, input, dt);
        let events = state.drain_events();

        if let Some(outcome) = state.outcome() {
            log::info!("Presenting game over: {outcome:?}");
            let over = GameOverScene::new(self.size, outcome);
            self.present(
                Scene::GameOver(over),
                Transition::FlipHorizontal {
                    duration: TRANSITION_DURATION,
                },
            );
        }
        events
    }

    /// Start a new run with the next seed
    pub fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        log::info!("Restarting with seed {}", self.seed);
        let scene = Self::gameplay(self.size, self.seed);
        self.present(scene, Transition::None);
    }
}
