//! 2D point arithmetic used for aiming and movement
//!
//! Thin wrappers over `glam::Vec2` with total behavior: dividing by zero or
//! normalizing a zero-length vector yields `Vec2::ZERO` instead of NaN.

use glam::Vec2;

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline]
pub fn scale(p: Vec2, s: f32) -> Vec2 {
    p * s
}

/// Component-wise division by a scalar. Returns zero when `s` is zero.
#[inline]
pub fn divide(p: Vec2, s: f32) -> Vec2 {
    if s == 0.0 { Vec2::ZERO } else { p / s }
}

/// Euclidean length `sqrt(x² + y²)`
#[inline]
pub fn length(p: Vec2) -> f32 {
    p.length()
}

/// Unit vector in the direction of `p`
///
/// Zero-length and non-finite inputs have no direction and return zero.
pub fn normalized(p: Vec2) -> Vec2 {
    if !p.is_finite() {
        return Vec2::ZERO;
    }
    divide(p, length(p))
}
