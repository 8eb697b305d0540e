//! Boundary crossing detection and deflection response
//!
//! The ring has no thickness: the ball crosses the boundary as soon as its
//! center reaches the arena radius. Whether that crossing is a deflection or a
//! miss depends only on the paddle's angular coverage.

use glam::DVec2;
use rand::Rng;

use super::state::{Physics, symmetric_noise};
use crate::{angular_difference, cartesian_to_polar};

/// Distances at or below this are treated as "at the center"
const MIN_CROSSING_DISTANCE: f64 = 1e-12;

/// A boundary crossing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Ball distance from center (>= arena radius)
    pub distance: f64,
    /// Crossing angle, [0, 2π)
    pub angle: f64,
    /// Outward unit normal at the crossing point
    pub normal: DVec2,
}

/// Check whether `pos` has reached the boundary
///
/// A zero-distance position never counts as crossed, even for a degenerate
/// arena radius, so the normal below is always well defined.
pub fn boundary_crossing(pos: DVec2, arena_radius: f64) -> Option<Crossing> {
    let (distance, angle) = cartesian_to_polar(pos);
    if distance < arena_radius || distance <= MIN_CROSSING_DISTANCE {
        return None;
    }

    Some(Crossing {
        distance,
        angle,
        normal: pos / distance,
    })
}

/// Paddle coverage: true iff the crossing angle is within `half_width` of the
/// paddle center (edges included)
#[inline]
pub fn is_covered(crossing_angle: f64, paddle_angle: f64, half_width: f64) -> bool {
    angular_difference(crossing_angle, paddle_angle) <= half_width
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Point on the normal just inside the boundary
#[inline]
pub fn reposition_inside(normal: DVec2, arena_radius: f64, inset: f64) -> DVec2 {
    normal * (arena_radius - inset).max(0.0)
}

/// Full deflection response: reflect, perturb, speed up
///
/// Returns the new velocity and the position the ball is moved back to.
pub fn deflect<R: Rng + ?Sized>(
    velocity: DVec2,
    crossing: &Crossing,
    physics: &Physics,
    rng: &mut R,
) -> (DVec2, DVec2) {
    let reflected = reflect_velocity(velocity, crossing.normal);
    let perturbed = DVec2::new(
        reflected.x + symmetric_noise(rng, physics.perturbation),
        reflected.y + symmetric_noise(rng, physics.perturbation),
    );
    let vel = physics.speed_up.apply(perturbed);
    let pos = reposition_inside(crossing.normal, physics.arena_radius, physics.deflect_inset);
    (vel, pos)
}
