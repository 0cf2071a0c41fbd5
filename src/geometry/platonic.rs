//! Seed tables for the Platonic solids.
//!
//! Vertex tables are unnormalized; the generator projects them onto the
//! requested radius. Index tables are counter-clockwise seen from outside.

use serde::Serialize;

use super::polyhedron;
use crate::types::IndexedMesh;

/// Golden ratio.
const PHI: f64 = 1.618_033_988_749_895;
/// Reciprocal of the golden ratio.
const INV_PHI: f64 = PHI - 1.0;

#[rustfmt::skip]
const TETRAHEDRON_VERTICES: [f64; 12] = [
    1.0, 1.0, 1.0,   -1.0, -1.0, 1.0,   -1.0, 1.0, -1.0,   1.0, -1.0, -1.0,
];

#[rustfmt::skip]
const TETRAHEDRON_INDICES: [u32; 12] = [
    2, 1, 0,   0, 3, 2,   1, 3, 0,   2, 3, 1,
];

#[rustfmt::skip]
const OCTAHEDRON_VERTICES: [f64; 18] = [
    1.0, 0.0, 0.0,   -1.0, 0.0, 0.0,   0.0, 1.0, 0.0,
    0.0, -1.0, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0, -1.0,
];

#[rustfmt::skip]
const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4,   0, 4, 3,   0, 3, 5,   0, 5, 2,
    1, 2, 5,   1, 5, 3,   1, 3, 4,   1, 4, 2,
];

#[rustfmt::skip]
const ICOSAHEDRON_VERTICES: [f64; 36] = [
    -1.0, PHI, 0.0,   1.0, PHI, 0.0,   -1.0, -PHI, 0.0,   1.0, -PHI, 0.0,
    0.0, -1.0, PHI,   0.0, 1.0, PHI,   0.0, -1.0, -PHI,   0.0, 1.0, -PHI,
    PHI, 0.0, -1.0,   PHI, 0.0, 1.0,   -PHI, 0.0, -1.0,   -PHI, 0.0, 1.0,
];

#[rustfmt::skip]
const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5,   0, 5, 1,   0, 1, 7,   0, 7, 10,   0, 10, 11,
    1, 5, 9,   5, 11, 4,   11, 10, 2,   10, 7, 6,   7, 1, 8,
    3, 9, 4,   3, 4, 2,   3, 2, 6,   3, 6, 8,   3, 8, 9,
    4, 9, 5,   2, 4, 11,   6, 2, 10,   8, 6, 7,   9, 8, 1,
];

#[rustfmt::skip]
const DODECAHEDRON_VERTICES: [f64; 60] = [
    // (+-1, +-1, +-1)
    -1.0, -1.0, -1.0,   -1.0, -1.0, 1.0,
    -1.0, 1.0, -1.0,   -1.0, 1.0, 1.0,
    1.0, -1.0, -1.0,   1.0, -1.0, 1.0,
    1.0, 1.0, -1.0,   1.0, 1.0, 1.0,
    // (0, +-1/phi, +-phi)
    0.0, -INV_PHI, -PHI,   0.0, -INV_PHI, PHI,
    0.0, INV_PHI, -PHI,   0.0, INV_PHI, PHI,
    // (+-1/phi, +-phi, 0)
    -INV_PHI, -PHI, 0.0,   -INV_PHI, PHI, 0.0,
    INV_PHI, -PHI, 0.0,   INV_PHI, PHI, 0.0,
    // (+-phi, 0, +-1/phi)
    -PHI, 0.0, -INV_PHI,   PHI, 0.0, -INV_PHI,
    -PHI, 0.0, INV_PHI,   PHI, 0.0, INV_PHI,
];

/// Twelve pentagons, each fanned into three triangles from its first corner.
#[rustfmt::skip]
const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7,   3, 7, 15,   3, 15, 13,
    7, 19, 17,   7, 17, 6,   7, 6, 15,
    17, 4, 8,   17, 8, 10,   17, 10, 6,
    8, 0, 16,   8, 16, 2,   8, 2, 10,
    0, 12, 1,   0, 1, 18,   0, 18, 16,
    6, 10, 2,   6, 2, 13,   6, 13, 15,
    2, 16, 18,   2, 18, 3,   2, 3, 13,
    18, 1, 9,   18, 9, 11,   18, 11, 3,
    4, 14, 12,   4, 12, 0,   4, 0, 8,
    11, 9, 5,   11, 5, 19,   11, 19, 7,
    19, 5, 14,   19, 14, 4,   19, 4, 17,
    1, 12, 14,   1, 14, 5,   1, 5, 9,
];

/// Number of pentagonal faces on a dodecahedron.
pub const DODECAHEDRON_FACES: usize = 12;
/// Triangles each pentagon is fanned into at detail 0.
pub const TRIANGLES_PER_PENTAGON: usize = 3;

/// The Platonic solids available as seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Solid {
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl Solid {
    /// Flat `[x, y, z, ...]` seed vertex table.
    pub fn vertices(self) -> &'static [f64] {
        match self {
            Solid::Tetrahedron => &TETRAHEDRON_VERTICES,
            Solid::Octahedron => &OCTAHEDRON_VERTICES,
            Solid::Icosahedron => &ICOSAHEDRON_VERTICES,
            Solid::Dodecahedron => &DODECAHEDRON_VERTICES,
        }
    }

    /// Seed triangle index table.
    pub fn indices(self) -> &'static [u32] {
        match self {
            Solid::Tetrahedron => &TETRAHEDRON_INDICES,
            Solid::Octahedron => &OCTAHEDRON_INDICES,
            Solid::Icosahedron => &ICOSAHEDRON_INDICES,
            Solid::Dodecahedron => &DODECAHEDRON_INDICES,
        }
    }

    /// Generate the solid at the given radius and subdivision level.
    pub fn mesh(self, radius: f64, detail: u32) -> IndexedMesh {
        polyhedron::generate(self.vertices(), self.indices(), radius, detail)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Octahedron => "octahedron",
            Solid::Icosahedron => "icosahedron",
            Solid::Dodecahedron => "dodecahedron",
        }
    }
}

impl std::fmt::Display for Solid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
