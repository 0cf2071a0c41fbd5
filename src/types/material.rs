use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::PortalError;

/// An sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// CSS named colors used by the portal faces.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aquamarine", [127, 255, 212]),
    ("gold", [255, 215, 0]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("lightblue", [173, 216, 230]),
    ("lightgreen", [144, 238, 144]),
    ("limegreen", [50, 205, 50]),
    ("orange", [255, 165, 0]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("violet", [238, 130, 238]),
    ("white", [255, 255, 255]),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as sRGB-encoded floats in [0, 1].
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Opaque linear RGBA, as glTF expects for `baseColorFactor`.
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let [r, g, b] = self.to_srgb_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Color {
    type Err = PortalError;

    /// Parse a CSS color name or a `#rgb` / `#rrggbb` hex literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| {
                PortalError::Scene(format!("Malformed hex color: {s}"))
            });
        }

        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, [r, g, b])| Color::rgb(*r, *g, *b))
            .ok_or_else(|| PortalError::Scene(format!("Unknown color name: {s}")))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let nibble = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// PBR material bound to one face group of the portal mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalMaterial {
    pub name: String,
    /// Face identifier / material slot this material is attached to.
    pub face: usize,
    pub background: Color,
    pub metallic: f32,
    pub roughness: f32,
}

impl PortalMaterial {
    pub fn new(face: usize, background: Color) -> Self {
        Self {
            name: format!("portal-{face}"),
            face,
            background,
            metallic: 0.0,
            roughness: 1.0,
        }
    }

    /// Base color factor [r, g, b, a] in linear space.
    pub fn base_color(&self) -> [f32; 4] {
        self.background.to_linear_rgba()
    }
}
