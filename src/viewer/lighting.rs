/// Scene lighting
///
/// Flat Lambert shading with one ambient term and any number of
/// directional lights. Directional lights shine from their position
/// toward the origin.

use cgmath::prelude::*;
use cgmath::Vector3;

/// Viewer background (slate-50)
pub const BACKGROUND: u32 = 0xf8fafc;

/// Convert a 0xRRGGBB color to RGB floats
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Light placed at `position`, aimed at the origin
    Directional { position: Vector3<f32> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: [1.0, 1.0, 1.0],
            intensity,
        }
    }

    pub fn directional(position: Vector3<f32>, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { position },
            color: [1.0, 1.0, 1.0],
            intensity,
        }
    }

    /// Contribution of this light on a surface with the given unit normal
    fn contribution(&self, normal: Vector3<f32>) -> f32 {
        match self.kind {
            LightKind::Ambient => self.intensity,
            LightKind::Directional { position } => {
                if position.magnitude2() <= f32::EPSILON {
                    return 0.0;
                }
                normal.dot(position.normalize()).max(0.0) * self.intensity
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightSet {
    pub lights: Vec<Light>,
}

impl LightSet {
    /// Ambient fill plus a key light and a softer fill light
    pub fn studio() -> Self {
        Self {
            lights: vec![
                Light::ambient(0.6),
                Light::directional(Vector3::new(5.0, 5.0, 5.0), 0.8),
                Light::directional(Vector3::new(-5.0, 0.0, 2.0), 0.3),
            ],
        }
    }

    /// Lit color of a surface, each channel clamped to 1.0
    pub fn shade(&self, base: [f32; 3], normal: Vector3<f32>) -> [f32; 3] {
        let mut lit = [0.0f32; 3];
        for light in &self.lights {
            let amount = light.contribution(normal);
            for (channel, out) in lit.iter_mut().enumerate() {
                *out += base[channel] * light.color[channel] * amount;
            }
        }
        lit.map(|c| c.clamp(0.0, 1.0))
    }
}
