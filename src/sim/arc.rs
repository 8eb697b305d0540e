//! Angular span geometry for the paddle
//!
//! The paddle is an arc of the boundary circle, described in polar terms by:
//! - center: angle of the arc midpoint (radians, [0, 2π))
//! - half_width: angular extent on each side of the center

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{angular_difference, normalize_angle, polar_to_cartesian};

/// An arc of a circle, centered on `center` and spanning `±half_width`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    /// Center angle (radians, normalized to [0, 2π))
    pub center: f64,
    /// Angular half-width (radians)
    pub half_width: f64,
}

impl ArcSpan {
    pub fn new(center: f64, half_width: f64) -> Self {
        Self {
            center: normalize_angle(center),
            half_width,
        }
    }

    /// Start angle (not normalized, so `start() <= end()` always holds)
    #[inline]
    pub fn start(&self) -> f64 {
        self.center - self.half_width
    }

    /// End angle (not normalized)
    #[inline]
    pub fn end(&self) -> f64 {
        self.center + self.half_width
    }

    /// Check if an angle is within the arc's angular extent (edges included)
    pub fn contains_angle(&self, theta: f64) -> bool {
        angular_difference(theta, self.center) <= self.half_width
    }

    /// Sample angles from start to end at a fixed step; the end angle is
    /// always included so the arc is drawn to its edges
    pub fn sample_angles(&self, step: f64) -> Vec<f64> {
        let span = self.end() - self.start();
        if step <= 0.0 || span <= 0.0 {
            return vec![self.center];
        }

        let count = (span / step).floor() as usize;
        let mut angles: Vec<f64> = (0..=count)
            .map(|i| self.start() + i as f64 * step)
            .collect();
        if angles.last().is_some_and(|&last| last < self.end()) {
            angles.push(self.end());
        }
        angles
    }

    /// Sample cartesian points along the arc at the given radius
    pub fn sample_points(&self, radius: f64, step: f64) -> Vec<DVec2> {
        self.sample_angles(step)
            .into_iter()
            .map(|theta| polar_to_cartesian(radius, theta))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_arc_contains_angle_no_wrap() {
        let arc = ArcSpan::new(PI / 2.0, PI / 4.0);
        assert!(arc.contains_angle(PI / 2.0));
        assert!(arc.contains_angle(PI / 3.0));
        assert!(!arc.contains_angle(PI));
        assert!(!arc.contains_angle(0.0));
    }

    #[test]
    fn test_arc_contains_angle_wraparound() {
        // Arc centered on 0 reaches across the 2π seam
        let arc = ArcSpan::new(0.0, 0.5);
        assert!(arc.contains_angle(TAU - 0.2));
        assert!(arc.contains_angle(-0.2));
        assert!(arc.contains_angle(0.2));
        assert!(!arc.contains_angle(PI));
    }

    #[test]
    fn test_arc_edges_are_inclusive() {
        let arc = ArcSpan::new(1.0, 0.5);
        assert!(arc.contains_angle(1.5));
        assert!(arc.contains_angle(0.5));
        assert!(!arc.contains_angle(1.5 + 1e-9));
    }

    #[test]
    fn test_center_is_normalized() {
        let arc = ArcSpan::new(-PI / 2.0, 0.1);
        assert!((arc.center - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_sample_angles_cover_both_edges() {
        let arc = ArcSpan::new(1.0, 0.5);
        let angles = arc.sample_angles(0.3);
        assert!((angles[0] - 0.5).abs() < 1e-12);
        assert!((angles.last().unwrap() - 1.5).abs() < 1e-12);
        assert!(angles.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sample_points_lie_on_radius() {
        let arc = ArcSpan::new(0.0, 0.5);
        for p in arc.sample_points(8.0, 0.1) {
            assert!((p.length() - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_step_yields_center() {
        let arc = ArcSpan::new(2.0, 0.5);
        assert_eq!(arc.sample_angles(0.0), vec![2.0]);
    }
}
