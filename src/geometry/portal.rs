//! Per-face indexed dodecahedron.
//!
//! The portal mesh is the detail-0 dodecahedron with its 36 triangles split
//! into 12 draw groups, one per pentagon, so each pentagon can carry its own
//! portal material. Group `i` covers index entries `[9i, 9i + 9)` and binds
//! material slot `i`.

use glam::{DMat3, DVec3};
use tracing::{debug, info};

use super::platonic::{DODECAHEDRON_FACES, Solid, TRIANGLES_PER_PENTAGON};
use crate::config::PortalGeometryConfig;
use crate::error::{PortalError, Result};
use crate::types::IndexedMesh;

/// Index entries per face group.
pub const INDICES_PER_FACE: usize = TRIANGLES_PER_PENTAGON * 3;

/// Fixed reorientation applied after grouping: Z first, then Y (radians).
pub const ORIENTATION_Z: f64 = 1.0;
pub const ORIENTATION_Y: f64 = 0.278;

/// Build the portal dodecahedron from `config`.
pub fn build_portal_geometry(config: &PortalGeometryConfig) -> Result<IndexedMesh> {
    build_indexed_dodecahedron(config.radius, config.detail)
}

/// Build an owned, per-face grouped dodecahedron.
///
/// Fails with [`PortalError::InvalidDetail`] for any `detail` other than 0,
/// before anything is generated: subdivision breaks the three-triangles-per-
/// pentagon layout the grouping relies on.
pub fn build_indexed_dodecahedron(radius: f64, detail: u32) -> Result<IndexedMesh> {
    if detail != 0 {
        return Err(PortalError::InvalidDetail(detail));
    }

    let base = Solid::Dodecahedron.mesh(radius, detail);

    let mut mesh = IndexedMesh {
        positions: base.positions.clone(),
        normals: base.normals.clone(),
        uvs: base.uvs.clone(),
        ..Default::default()
    };

    for face in 0..DODECAHEDRON_FACES {
        let start_triangle = face * TRIANGLES_PER_PENTAGON;
        mesh.add_group(start_triangle * 3, INDICES_PER_FACE, face);
    }
    debug_assert!(mesh.groups_partition_indices());

    rotate(&mut mesh, DMat3::from_rotation_z(ORIENTATION_Z));
    rotate(&mut mesh, DMat3::from_rotation_y(ORIENTATION_Y));

    info!(
        radius,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        groups = mesh.groups.len(),
        "Built portal dodecahedron"
    );

    Ok(mesh)
}

/// Apply a rotation to positions and normals in place.
///
/// Math runs in f64 and is written back as f32; normals are re-normalized.
pub fn rotate(mesh: &mut IndexedMesh, rotation: DMat3) {
    for p in mesh.positions.chunks_exact_mut(3) {
        let v = rotation * DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64);
        p.copy_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
    }

    for n in mesh.normals.chunks_exact_mut(3) {
        let v = (rotation * DVec3::new(n[0] as f64, n[1] as f64, n[2] as f64)).normalize_or_zero();
        n.copy_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
    }

    debug!(vertices = mesh.vertex_count(), "Rotated mesh");
}

/// The fixed orientation as a single matrix (Y after Z).
pub fn orientation() -> DMat3 {
    DMat3::from_rotation_y(ORIENTATION_Y) * DMat3::from_rotation_z(ORIENTATION_Z)
}
