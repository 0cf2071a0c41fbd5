use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PortalError, Result};
use crate::types::{BoundingBox, IndexedMesh};

/// One drawable piece of the room model.
#[derive(Debug, Clone)]
pub struct RoomPart {
    pub name: Option<String>,
    pub mesh: IndexedMesh,
    /// Whether the source material carries an ambient-occlusion map.
    pub has_occlusion: bool,
}

impl RoomPart {
    /// AO intensity the chamber material uses for this part.
    pub fn ao_intensity(&self) -> f32 {
        if self.has_occlusion { 1.0 } else { 0.0 }
    }
}

/// The room model shown inside every chamber, rendered from the inside.
#[derive(Debug, Clone, Default)]
pub struct RoomAsset {
    pub parts: Vec<RoomPart>,
}

impl RoomAsset {
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.parts
            .iter()
            .filter_map(|p| BoundingBox::from_positions(&p.mesh.positions))
            .reduce(|a, b| a.merge(&b))
    }
}

/// Load the room model from a glTF or GLB file.
///
/// Every mesh primitive becomes one [`RoomPart`]. Primitives without
/// positions or indices are skipped.
pub fn load_room(path: &Path) -> Result<RoomAsset> {
    if !path.exists() {
        return Err(PortalError::Input(format!(
            "Room model not found: {}",
            path.display()
        )));
    }

    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| PortalError::Input(format!("Failed to load room model: {e}")))?;

    debug!(
        meshes = document.meshes().len(),
        materials = document.materials().len(),
        "Loaded room document"
    );

    let mut parts = Vec::new();
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            match extract_primitive(&primitive, &buffers) {
                Ok(mut indexed) => {
                    indexed.material_index = primitive.material().index();
                    parts.push(RoomPart {
                        name: mesh.name().map(str::to_string),
                        mesh: indexed,
                        has_occlusion: primitive.material().occlusion_texture().is_some(),
                    });
                }
                Err(e) => {
                    warn!(mesh = ?mesh.name(), "Skipping room primitive: {e}");
                }
            }
        }
    }

    let room = RoomAsset { parts };
    info!(
        path = %path.display(),
        parts = room.parts.len(),
        triangles = room.triangle_count(),
        "Loaded room model"
    );

    Ok(room)
}

/// Extract geometry from a single glTF primitive.
fn extract_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<IndexedMesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<f32> = reader
        .read_positions()
        .ok_or_else(|| PortalError::Input("Primitive missing positions".into()))?
        .flatten()
        .collect();

    let normals: Vec<f32> = reader
        .read_normals()
        .map(|iter| iter.flatten().collect())
        .unwrap_or_default();

    let uvs: Vec<f32> = reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().flatten().collect())
        .unwrap_or_default();

    let indices: Vec<u32> = reader
        .read_indices()
        .ok_or_else(|| PortalError::Input("Primitive missing indices".into()))?
        .into_u32()
        .collect();

    Ok(IndexedMesh {
        positions,
        normals,
        uvs,
        indices,
        ..Default::default()
    })
}
