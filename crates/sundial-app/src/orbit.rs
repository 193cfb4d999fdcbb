//! Camera circling the terrain at a fixed height, looking at the origin.

use glam::{Mat4, Vec3};
use sundial_terrain::Landscape;

/// Orbit radius as a multiple of the landscape radius.
pub const ORBIT_RADIUS_FACTOR: f32 = 1.4;

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
}

impl CameraPose {
    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Horizontal orbit around the scene origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOrbit {
    angle_degrees: f64,
    radius: f32,
    height: f32,
}

impl CameraOrbit {
    /// Orbit at `radius` from the vertical axis and `height` above the ground,
    /// starting at angle 0.
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            angle_degrees: 0.0,
            radius,
            height,
        }
    }

    /// Orbit that keeps the whole landscape in frame.
    ///
    /// Radius is `1.4 ×` the landscape radius, height equals the landscape
    /// radius, both in scene units.
    pub fn framing(landscape: &Landscape) -> Self {
        let reach = landscape.radius();
        Self::new(reach * ORBIT_RADIUS_FACTOR, reach)
    }

    /// Current angle, always in `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Distance from the vertical axis.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Camera height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Rotate by `step_degrees`, wrapping into `[0, 360)`.
    pub fn advance(&mut self, step_degrees: f64) -> f64 {
        let next = (self.angle_degrees + step_degrees).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        self.angle_degrees = if next >= 360.0 { 0.0 } else { next };
        self.angle_degrees
    }

    /// Camera pose for the current angle.
    pub fn pose(&self) -> CameraPose {
        let angle = self.angle_degrees.to_radians();
        CameraPose {
            position: Vec3::new(
                angle.cos() as f32 * self.radius,
                self.height,
                angle.sin() as f32 * self.radius,
            ),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}
