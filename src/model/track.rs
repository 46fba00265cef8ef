//! Annular race track centred at the origin.

use neurodrive_core::config::TrackConfig;
use serde::{Deserialize, Serialize};

/// Position and heading of the car. `heading` is in radians, counter-clockwise
/// from the +x axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl Pose {
    #[must_use]
    pub fn distance_to(&self, other: &Pose) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Track {
    #[must_use]
    pub fn new(config: &TrackConfig) -> Self {
        Self {
            inner_radius: config.inner_radius,
            outer_radius: config.outer_radius,
        }
    }

    /// On the centre line at angle 0, facing counter-clockwise.
    #[must_use]
    pub fn start_pose(&self) -> Pose {
        Pose {
            x: (self.inner_radius + self.outer_radius) * 0.5,
            y: 0.0,
            heading: std::f32::consts::FRAC_PI_2,
        }
    }

    /// Strictly between the two walls.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let r = x.hypot(y);
        r > self.inner_radius && r < self.outer_radius
    }

    /// Distance from `(x, y)` along `angle` to the nearest wall, if any wall
    /// lies ahead.
    #[must_use]
    pub fn raycast(&self, x: f32, y: f32, angle: f32) -> Option<f32> {
        let (dy, dx) = angle.sin_cos();
        [self.inner_radius, self.outer_radius]
            .into_iter()
            .filter_map(|radius| ray_circle(x, y, dx, dy, radius))
            .min_by(f32::total_cmp)
    }
}

/// Smallest positive `t` with `|o + t*d| = radius` for a unit direction `d`.
fn ray_circle(ox: f32, oy: f32, dx: f32, dy: f32, radius: f32) -> Option<f32> {
    let b = ox * dx + oy * dy;
    let c = ox * ox + oy * oy - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    [-b - root, -b + root]
        .into_iter()
        .find(|t| *t > f32::EPSILON)
}
