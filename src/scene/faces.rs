//! The twelve portal faces.
//!
//! Each face of the portal dodecahedron opens onto its own chamber: a room
//! tinted with the face's background color and a spinning primitive. The
//! faces differ only in data, so they live in one ordered table indexed by
//! face identifier.

use std::f32::consts::PI;

use serde::Serialize;

use crate::error::{PortalError, Result};
use crate::geometry::Solid;
use crate::types::{Color, IndexedMesh};

/// Primitive shown inside a portal, with its constructor arguments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InnerShape {
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Platonic {
        solid: Solid,
        radius: f32,
        detail: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Chamber with no shape.
    Empty,
}

impl InnerShape {
    const fn platonic(solid: Solid, radius: f32) -> Self {
        InnerShape::Platonic {
            solid,
            radius,
            detail: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InnerShape::Torus { .. } => "torus",
            InnerShape::TorusKnot { .. } => "torus_knot",
            InnerShape::Box { .. } => "box",
            InnerShape::Platonic { solid, .. } => solid.as_str(),
            InnerShape::Sphere { .. } => "sphere",
            InnerShape::Cone { .. } => "cone",
            InnerShape::Cylinder { .. } => "cylinder",
            InnerShape::Empty => "empty",
        }
    }

    /// Generated mesh for the Platonic shapes; the curved primitives are left
    /// to the renderer.
    pub fn platonic_mesh(&self) -> Option<IndexedMesh> {
        match *self {
            InnerShape::Platonic {
                solid,
                radius,
                detail,
            } => Some(solid.mesh(radius as f64, detail)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InnerShape::Empty)
    }
}

/// Static description of one face.
#[derive(Debug, Clone, Copy)]
pub struct FaceDef {
    /// Euler XYZ rotation of the chamber contents, radians.
    pub rotation: [f32; 3],
    /// CSS color name or hex literal.
    pub background: &'static str,
    pub shape: InnerShape,
}

/// Default background of a face that does not name one.
pub const DEFAULT_BACKGROUND: &str = "#f0f0f0";

/// Faces in face-identifier order.
pub const FACE_TABLE: [FaceDef; 12] = [
    FaceDef {
        rotation: [0.0, 0.0, 0.0],
        background: "orange",
        shape: InnerShape::Torus {
            radius: 0.65,
            tube: 0.3,
            radial_segments: 64,
            tubular_segments: 48,
        },
    },
    FaceDef {
        rotation: [0.0, PI, 0.0],
        background: "lightblue",
        shape: InnerShape::TorusKnot {
            radius: 0.55,
            tube: 0.2,
            tubular_segments: 128,
            radial_segments: 32,
        },
    },
    FaceDef {
        rotation: [0.0, PI / 2.0, PI / 2.0],
        background: "lightgreen",
        shape: InnerShape::Box {
            width: 1.15,
            height: 1.15,
            depth: 1.15,
        },
    },
    FaceDef {
        rotation: [0.0, PI / 2.0, -PI / 2.0],
        background: "aquamarine",
        shape: InnerShape::platonic(Solid::Octahedron, 1.0),
    },
    FaceDef {
        rotation: [0.0, -PI / 2.0, 0.0],
        background: "indianred",
        shape: InnerShape::platonic(Solid::Icosahedron, 1.0),
    },
    FaceDef {
        rotation: [0.0, PI / 2.0, 0.0],
        background: "hotpink",
        shape: InnerShape::platonic(Solid::Dodecahedron, 1.0),
    },
    FaceDef {
        rotation: [PI / 3.0, PI / 5.0, 0.0],
        background: "gold",
        shape: InnerShape::Sphere {
            radius: 0.75,
            width_segments: 32,
            height_segments: 32,
        },
    },
    FaceDef {
        rotation: [-PI / 3.0, PI / 5.0, 0.0],
        background: "violet",
        shape: InnerShape::Cone {
            radius: 0.75,
            height: 1.5,
            radial_segments: 32,
        },
    },
    FaceDef {
        rotation: [PI / 3.0, -PI / 5.0, 0.0],
        background: "skyblue",
        shape: InnerShape::platonic(Solid::Tetrahedron, 0.85),
    },
    FaceDef {
        rotation: [-PI / 3.0, -PI / 5.0, 0.0],
        background: "limegreen",
        shape: InnerShape::Cylinder {
            radius_top: 0.5,
            radius_bottom: 0.5,
            height: 1.5,
            radial_segments: 32,
        },
    },
    FaceDef {
        rotation: [PI / 5.0, PI / 3.0, 0.0],
        background: "white",
        shape: InnerShape::Empty,
    },
    FaceDef {
        rotation: [-PI / 5.0, -PI / 3.0, 0.0],
        background: "slateblue",
        shape: InnerShape::Torus {
            radius: 0.55,
            tube: 0.2,
            radial_segments: 32,
            tubular_segments: 32,
        },
    },
];

/// One face with its background resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacePortal {
    /// Face identifier; also the material slot of the matching face group.
    pub face: usize,
    pub rotation: [f32; 3],
    pub background: Color,
    pub shape: InnerShape,
}

impl FacePortal {
    pub fn from_def(face: usize, def: &FaceDef) -> Result<Self> {
        let background = if def.background.is_empty() {
            DEFAULT_BACKGROUND
        } else {
            def.background
        };

        Ok(FacePortal {
            face,
            rotation: def.rotation,
            background: background.parse().map_err(|_| {
                PortalError::Scene(format!("Face {face}: unknown background {background:?}"))
            })?,
            shape: def.shape,
        })
    }
}

/// Resolve a face table, checking it has one entry per portal face.
pub fn resolve_faces(table: &[FaceDef], face_count: usize) -> Result<Vec<FacePortal>> {
    if table.len() != face_count {
        return Err(PortalError::Scene(format!(
            "Face table has {} entries, portal has {face_count} faces",
            table.len()
        )));
    }

    table
        .iter()
        .enumerate()
        .map(|(face, def)| FacePortal::from_def(face, def))
        .collect()
}

/// The built-in twelve faces.
pub fn default_faces() -> Result<Vec<FacePortal>> {
    resolve_faces(&FACE_TABLE, FACE_TABLE.len())
}
