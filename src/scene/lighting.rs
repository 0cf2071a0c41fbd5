use serde::Serialize;

use crate::types::Color;

/// Shadow-casting spot light placed inside each chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpotLight {
    pub intensity: f32,
    pub position: [f32; 3],
    /// Cone half-angle, radians.
    pub angle: f32,
    pub penumbra: f32,
    pub cast_shadow: bool,
    pub shadow_normal_bias: f32,
    pub shadow_bias: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            intensity: 2.0,
            position: [12.0, 10.0, -5.0],
            angle: 0.15,
            penumbra: 1.2,
            cast_shadow: true,
            shadow_normal_bias: 0.05,
            shadow_bias: 0.0001,
        }
    }
}

/// Lights shared by every chamber. The spot light takes the face's
/// background as its color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightRig {
    pub ambient_intensity: f32,
    /// Image-based lighting preset name.
    pub environment: String,
    pub spot: SpotLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            environment: "city".into(),
            spot: SpotLight::default(),
        }
    }
}

/// Spot light as placed in one chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TintedSpot {
    pub color: Color,
    #[serde(flatten)]
    pub light: SpotLight,
}

impl LightRig {
    pub fn spot_for(&self, background: Color) -> TintedSpot {
        TintedSpot {
            color: background,
            light: self.spot,
        }
    }
}
