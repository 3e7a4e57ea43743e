//! SDF-based overlap tests
//!
//! Signed distance functions for the two body shapes plus a sphere-traced
//! sweep used by precise (continuous) bodies.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box given its center and half extents
pub fn sd_box(p: Vec2, center: Vec2, half_extents: Vec2) -> f32 {
    let d = (p - center).abs() - half_extents;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Whether two axis-aligned boxes overlap
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

/// Sweep a point with a clearance radius from `start` to `end`
///
/// Returns the fraction of the path at which the clearance first touches the
/// shape described by `sdf`, or `None` if the whole path stays clear.
pub fn raymarch_collision<F>(
    start: Vec2,
    end: Vec2,
    radius: f32,
    max_steps: usize,
    sdf: F,
) -> Option<f32>
where
    F: Fn(Vec2) -> f32,
{
    if sdf(start) < radius {
        return Some(0.0);
    }

    let dir = end - start;
    let total_dist = dir.length();
    if total_dist < 0.001 {
        return None;
    }
    let dir_norm = dir / total_dist;

    let mut t = 0.0;

    for _ in 0..max_steps {
        let p = start + dir_norm * t;
        let d = sdf(p);

        if d < radius {
            return Some(t / total_dist);
        }

        // Step by distance to surface (sphere tracing)
        let step = (d - radius * 0.5).max(0.5);
        t += step;

        if t >= total_dist {
            break;
        }
    }

    // Sphere tracing never overshoots a convex shape, so the end point decides
    (sdf(end) < radius).then_some(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_box() {
        let c = Vec2::new(10.0, 10.0);
        let half = Vec2::new(5.0, 5.0);
        assert!((sd_box(Vec2::new(20.0, 10.0), c, half) - 5.0).abs() < 1e-5);
        assert!((sd_box(c, c, half) + 5.0).abs() < 1e-5);
        // Corner region measures to the corner
        let corner = sd_box(Vec2::new(18.0, 19.0), c, half);
        assert!((corner - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_sd_circle() {
        assert!((sd_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 2.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_boxes_overlap() {
        let half = Vec2::new(5.0, 5.0);
        assert!(boxes_overlap(Vec2::ZERO, half, Vec2::new(9.0, 0.0), half));
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(10.0, 0.0), half));
        assert!(!boxes_overlap(Vec2::ZERO, half, Vec2::new(0.0, 11.0), half));
    }

    #[test]
    fn test_sweep_catches_thin_crossing() {
        // A thin box straddling the path, far from both endpoints
        let sdf = |p: Vec2| sd_box(p, Vec2::new(0.0, 50.0), Vec2::new(20.0, 1.0));
        let hit = raymarch_collision(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.0, 64, sdf);
        let t = hit.expect("sweep should hit the box");
        assert!(t > 0.4 && t < 0.5);
    }

    #[test]
    fn test_sweep_misses_offset_box() {
        let sdf = |p: Vec2| sd_box(p, Vec2::new(40.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(raymarch_collision(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.0, 64, sdf).is_none());
    }
}
