//! Directional light descriptors handed to the render boundary.
//!
//! [`DirectionalLight`] is the CPU-side description of the sun or moon
//! light for one frame. [`DirectionalLightUniform`] is the packed layout a
//! GPU renderer writes into a uniform buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{CelestialBodyState, Rgb};

/// Shadow map parameters for a light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSettings {
    /// Whether the light casts shadows.
    pub cast_shadow: bool,
    /// Shadow map edge length in texels.
    pub map_size: u32,
    /// Depth bias; negative values reduce self-shadowing on double-sided faces.
    pub bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            cast_shadow: true,
            map_size: 512,
            bias: -0.005,
        }
    }
}

/// Small unlit sphere drawn at the light position so the body is visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightMarker {
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Unlit sphere color.
    pub color: Rgb,
}

impl LightMarker {
    /// Pale orange sun disk.
    pub const SUN: Self = Self {
        radius: 50.0,
        color: Rgb::from_hex(0xffccaa),
    };

    /// Pale cyan moon disk.
    pub const MOON: Self = Self {
        radius: 50.0,
        color: Rgb::from_hex(0xeeffff),
    };
}

/// A directional light aimed at the scene origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Light position; the light shines from here toward the origin.
    pub position: Vec3,
    /// Light color.
    pub color: Rgb,
    /// Intensity multiplier, `>= 0`.
    pub intensity: f32,
    /// Shadow map parameters.
    pub shadow: ShadowSettings,
    /// Visible marker sphere.
    pub marker: LightMarker,
}

impl DirectionalLight {
    /// Sun light for this tick.
    pub fn sun(state: &CelestialBodyState) -> Self {
        Self::from_state(state, LightMarker::SUN)
    }

    /// Moon light for this tick.
    pub fn moon(state: &CelestialBodyState) -> Self {
        Self::from_state(state, LightMarker::MOON)
    }

    fn from_state(state: &CelestialBodyState, marker: LightMarker) -> Self {
        Self {
            position: state.direction,
            color: state.color,
            intensity: state.intensity.max(0.0),
            shadow: ShadowSettings::default(),
            marker,
        }
    }

    /// Normalized direction the light travels: from its position to the origin.
    ///
    /// Zero if the light sits at the origin.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }

    /// Returns `true` when the light contributes nothing.
    pub fn is_off(&self) -> bool {
        self.intensity <= 0.0
    }

    /// Build the GPU-side uniform.
    pub fn to_uniform(&self) -> DirectionalLightUniform {
        let dir = self.direction();
        let color = self.color.to_vec3();
        DirectionalLightUniform {
            direction_intensity: [dir.x, dir.y, dir.z, self.intensity],
            color_padding: [color.x, color.y, color.z, 0.0],
        }
    }
}

/// GPU-side representation, 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// xyz = direction (normalized), w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = color (normalized rgb), w = padding.
    pub color_padding: [f32; 4],
}
