//! Physics bodies attached to entities
//!
//! Every body is a gravity-free sensor: collision category is always `None`,
//! so overlapping bodies pass through each other and only contacts matter.

use glam::Vec2;

use super::category::PhysicsCategory;
use super::sdf::{boxes_overlap, raymarch_collision, sd_box, sd_circle};

/// Sphere-tracing step cap for precise sweeps
const SWEEP_MAX_STEPS: usize = 64;

/// Collision shape, centered on the entity position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { half_extents: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Rectangle covering a sprite of the given size
    pub fn rect(size: Vec2) -> Self {
        Shape::Rect {
            half_extents: size * 0.5,
        }
    }

    /// Circle inscribed in a sprite of the given size
    pub fn circle(size: Vec2) -> Self {
        Shape::Circle {
            radius: size.y * 0.5,
        }
    }

    /// Signed distance from `p` to this shape placed at `center`
    pub fn distance(&self, center: Vec2, p: Vec2) -> f32 {
        match *self {
            Shape::Rect { half_extents } => sd_box(p, center, half_extents),
            Shape::Circle { radius } => sd_circle(p, center, radius),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub shape: Shape,
    pub dynamic: bool,
    pub category: PhysicsCategory,
    pub contact_test: PhysicsCategory,
    pub collision: PhysicsCategory,
    /// Sweep between steps instead of sampling only the current position
    pub precise: bool,
}

impl PhysicsBody {
    /// Dynamic sensor body with no collision response
    pub fn sensor(shape: Shape, category: PhysicsCategory, contact_test: PhysicsCategory) -> Self {
        Self {
            shape,
            dynamic: true,
            category,
            contact_test,
            collision: PhysicsCategory::None,
            precise: false,
        }
    }

    pub fn with_precise_collision(mut self) -> Self {
        self.precise = true;
        self
    }

    /// Whether either body asks to be told about touching the other
    pub fn wants_contact(&self, other: &PhysicsBody) -> bool {
        self.contact_test.accepts(other.category) || other.contact_test.accepts(self.category)
    }
}

/// Placement of a body for one overlap test
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub body: &'a PhysicsBody,
    pub pos: Vec2,
    /// Position at the previous step (equal to `pos` for new bodies)
    pub prev_pos: Vec2,
}

/// Whether two placed bodies touch this step
pub fn bodies_touch(a: Placed<'_>, b: Placed<'_>) -> bool {
    if static_overlap(a.body.shape, a.pos, b.body.shape, b.pos) {
        return true;
    }
    // Sweep the precise body along its path against the other's current shape
    if a.body.precise && sweep_hits(a, b) {
        return true;
    }
    b.body.precise && sweep_hits(b, a)
}

fn static_overlap(a: Shape, a_pos: Vec2, b: Shape, b_pos: Vec2) -> bool {
    match (a, b) {
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            boxes_overlap(a_pos, ha, b_pos, hb)
        }
        (Shape::Circle { radius }, other) => other.distance(b_pos, a_pos) < radius,
        (other, Shape::Circle { radius }) => other.distance(a_pos, b_pos) < radius,
    }
}

fn sweep_hits(mover: Placed<'_>, target: Placed<'_>) -> bool {
    // Sweep the mover's center with its inscribed radius as clearance
    let clearance = match mover.body.shape {
        Shape::Circle { radius } => radius,
        Shape::Rect { half_extents } => half_extents.min_element(),
    };
    let shape = target.body.shape;
    raymarch_collision(mover.prev_pos, mover.pos, clearance, SWEEP_MAX_STEPS, |p| {
        shape.distance(target.pos, p)
    })
    .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster() -> PhysicsBody {
        PhysicsBody::sensor(
            Shape::rect(Vec2::new(40.0, 40.0)),
            PhysicsCategory::Monster,
            PhysicsCategory::Projectile,
        )
    }

    fn projectile() -> PhysicsBody {
        PhysicsBody::sensor(
            Shape::circle(Vec2::new(10.0, 10.0)),
            PhysicsCategory::Projectile,
            PhysicsCategory::Monster,
        )
        .with_precise_collision()
    }

    fn at(body: &PhysicsBody, pos: Vec2) -> Placed<'_> {
        Placed {
            body,
            pos,
            prev_pos: pos,
        }
    }

    #[test]
    fn test_sensor_has_no_collision_response() {
        let body = monster();
        assert!(body.dynamic);
        assert_eq!(body.collision, PhysicsCategory::None);
        assert!(!body.precise);
        assert!(projectile().precise);
    }

    #[test]
    fn test_circle_rect_overlap() {
        let m = monster();
        let p = projectile();
        assert!(bodies_touch(at(&m, Vec2::ZERO), at(&p, Vec2::new(0.0, 24.0))));
        assert!(bodies_touch(at(&p, Vec2::new(0.0, 24.0)), at(&m, Vec2::ZERO)));
        assert!(!bodies_touch(at(&m, Vec2::ZERO), at(&p, Vec2::new(0.0, 26.0))));
    }

    #[test]
    fn test_precise_body_does_not_tunnel() {
        let m = monster();
        let p = projectile();
        // Jumps from below the monster to above it in one step
        let fast = Placed {
            body: &p,
            pos: Vec2::new(0.0, 100.0),
            prev_pos: Vec2::new(0.0, -100.0),
        };
        assert!(bodies_touch(at(&m, Vec2::ZERO), fast));

        let mut coarse = p.clone();
        coarse.precise = false;
        let fast = Placed {
            body: &coarse,
            pos: Vec2::new(0.0, 100.0),
            prev_pos: Vec2::new(0.0, -100.0),
        };
        assert!(!bodies_touch(at(&m, Vec2::ZERO), fast));
    }

    #[test]
    fn test_wants_contact() {
        let player = PhysicsBody::sensor(
            Shape::rect(Vec2::new(50.0, 50.0)),
            PhysicsCategory::Player,
            PhysicsCategory::Monster,
        );
        assert!(player.wants_contact(&monster()));
        assert!(monster().wants_contact(&projectile()));
        assert!(!player.wants_contact(&projectile()));
        assert!(!projectile().wants_contact(&projectile()));
    }
}
