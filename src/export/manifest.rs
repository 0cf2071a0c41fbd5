use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::SceneSettings;
use crate::error::{PortalError, Result};
use crate::scene::lighting::{LightRig, TintedSpot};
use crate::scene::{InnerShape, PortalScene};
use crate::types::Color;

/// JSON description of the scene a renderer needs besides the portal GLB.
#[derive(Debug, Serialize)]
pub struct SceneManifest<'a> {
    pub generator: &'static str,
    pub geometry: GeometrySummary,
    pub settings: &'a SceneSettings,
    pub lights: &'a LightRig,
    pub elapsed: f64,
    pub faces: Vec<FaceEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSummary>,
}

#[derive(Debug, Serialize)]
pub struct GeometrySummary {
    pub vertices: usize,
    pub triangles: usize,
    pub index_count: usize,
    pub groups: usize,
}

#[derive(Debug, Serialize)]
pub struct FaceEntry<'a> {
    pub face: usize,
    pub group_start: usize,
    pub group_count: usize,
    pub normal: [f32; 3],
    pub rotation: [f32; 3],
    pub background: Color,
    pub shape: &'a InnerShape,
    /// Generated inner mesh, for the Platonic shapes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_mesh: Option<InnerMeshSummary>,
    /// Euler XYZ spin of the inner shape, radians.
    pub spin: [f64; 3],
    pub spot: TintedSpot,
}

#[derive(Debug, Serialize)]
pub struct InnerMeshSummary {
    pub vertices: usize,
    pub triangles: usize,
}

#[derive(Debug, Serialize)]
pub struct RoomSummary {
    pub parts: usize,
    pub triangles: usize,
    /// Per-part AO intensity, in load order.
    pub ao_intensity: Vec<f32>,
    pub back_side: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 3]>,
    /// Bounding-box diagonal, before `room_scale` is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<f64>,
}

impl<'a> SceneManifest<'a> {
    pub fn from_scene(scene: &'a PortalScene) -> Self {
        let geometry = &scene.geometry;

        let faces = scene
            .chambers
            .iter()
            .map(|c| FaceEntry {
                face: c.portal.face,
                group_start: c.group.start,
                group_count: c.group.count,
                normal: c.normal,
                rotation: c.portal.rotation,
                background: c.portal.background,
                shape: &c.portal.shape,
                inner_mesh: c.portal.shape.platonic_mesh().map(|m| InnerMeshSummary {
                    vertices: m.vertex_count(),
                    triangles: m.triangle_count(),
                }),
                spin: c.spin.euler(),
                spot: scene.lights.spot_for(c.portal.background),
            })
            .collect();

        let room = scene.room.as_ref().map(|room| {
            let bounds = room.bounds();
            RoomSummary {
                parts: room.parts.len(),
                triangles: room.triangle_count(),
                ao_intensity: room.parts.iter().map(|p| p.ao_intensity()).collect(),
                back_side: true,
                center: bounds.map(|b| b.center()),
                extent: bounds.map(|b| b.diagonal()),
            }
        });

        SceneManifest {
            generator: "portal-dodeca",
            geometry: GeometrySummary {
                vertices: geometry.vertex_count(),
                triangles: geometry.triangle_count(),
                index_count: geometry.index_count(),
                groups: geometry.groups.len(),
            },
            settings: &scene.settings,
            lights: &scene.lights,
            elapsed: scene.elapsed,
            faces,
            room,
        }
    }
}

/// Write `scene.json` describing `scene` to `path`.
pub fn write_manifest(scene: &PortalScene, path: &Path) -> Result<()> {
    let manifest = SceneManifest::from_scene(scene);
    let json_string = serde_json::to_string_pretty(&manifest)
        .map_err(|e| PortalError::Output(format!("Failed to serialize scene manifest: {e}")))?;

    fs::write(path, &json_string)
        .map_err(|e| PortalError::Output(format!("Failed to write scene manifest: {e}")))?;

    info!(
        faces = manifest.faces.len(),
        path = %path.display(),
        "Wrote scene manifest"
    );

    Ok(())
}
