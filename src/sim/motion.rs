//! Scripted, time-based motion
//!
//! A one-shot linear move from a start point to a destination over a fixed
//! duration, optionally followed by removal of the owning entity. Advanced
//! once per tick; there is no cancellation other than dropping the entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What happens when the move completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnComplete {
    /// Entity stays at the destination
    Hold,
    /// Entity is removed from the scene
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Active {
        start: Vec2,
        end: Vec2,
        duration: f32,
        remaining: f32,
        on_complete: OnComplete,
    },
    Done,
}

/// Result of advancing a motion by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStep {
    /// No motion in flight
    Idle,
    /// Still travelling, now at this position
    Moving(Vec2),
    /// Reached the destination and holds there
    Arrived(Vec2),
    /// Reached the destination; the entity must be removed
    Remove,
}

impl Motion {
    pub fn move_to(start: Vec2, end: Vec2, duration: f32, on_complete: OnComplete) -> Self {
        Motion::Active {
            start,
            end,
            duration,
            remaining: duration,
            on_complete,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Motion::Active { .. })
    }

    pub fn destination(&self) -> Option<Vec2> {
        match self {
            Motion::Active { end, .. } => Some(*end),
            Motion::Done => None,
        }
    }

    pub fn duration(&self) -> Option<f32> {
        match self {
            Motion::Active { duration, .. } => Some(*duration),
            Motion::Done => None,
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> MotionStep {
        let Motion::Active {
            start,
            end,
            duration,
            remaining,
            on_complete,
        } = self
        else {
            return MotionStep::Idle;
        };

        *remaining = (*remaining - dt).max(0.0);
        if *remaining > 0.0 {
            let t = 1.0 - *remaining / *duration;
            return MotionStep::Moving(start.lerp(*end, t));
        }

        let step = match on_complete {
            OnComplete::Hold => MotionStep::Arrived(*end),
            OnComplete::Remove => MotionStep::Remove,
        };
        *self = Motion::Done;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interpolation() {
        let mut m = Motion::move_to(Vec2::ZERO, Vec2::new(0.0, -100.0), 4.0, OnComplete::Remove);
        match m.advance(1.0) {
            MotionStep::Moving(p) => assert!((p.y + 25.0).abs() < 1e-4),
            other => panic!("unexpected step {other:?}"),
        }
        match m.advance(2.0) {
            MotionStep::Moving(p) => assert!((p.y + 75.0).abs() < 1e-4),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_remove_after_arrival() {
        let mut m = Motion::move_to(Vec2::ZERO, Vec2::ONE, 1.0, OnComplete::Remove);
        assert!(matches!(m.advance(0.5), MotionStep::Moving(_)));
        assert_eq!(m.advance(0.75), MotionStep::Remove);
        assert!(!m.is_active());
        assert_eq!(m.advance(1.0), MotionStep::Idle);
    }

    #[test]
    fn test_hold_after_arrival() {
        let end = Vec2::new(30.0, 40.0);
        let mut m = Motion::move_to(Vec2::ZERO, end, 0.2, OnComplete::Hold);
        assert_eq!(m.advance(0.25), MotionStep::Arrived(end));
        assert_eq!(m, Motion::Done);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut m = Motion::move_to(Vec2::ZERO, Vec2::ONE, 0.0, OnComplete::Hold);
        assert_eq!(m.advance(0.0), MotionStep::Arrived(Vec2::ONE));
    }
}
