pub mod animation;
pub mod faces;
pub mod lighting;
pub mod room;

pub use animation::Spin;
pub use faces::{FacePortal, InnerShape, default_faces};
pub use lighting::LightRig;
pub use room::{RoomAsset, load_room};

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::{FALLBACK_ROOM_SCALE, SceneSettings};
use crate::error::{PortalError, Result};
use crate::types::{FaceGroup, IndexedMesh, PortalMaterial};

/// One face's chamber, ready for a renderer.
#[derive(Debug, Clone)]
pub struct Chamber {
    pub portal: FacePortal,
    /// Draw range on the portal mesh this chamber is seen through.
    pub group: FaceGroup,
    /// Outward normal of the face, after the portal orientation.
    pub normal: [f32; 3],
    pub spin: Spin,
}

/// The assembled portal scene.
#[derive(Debug, Clone)]
pub struct PortalScene {
    pub geometry: IndexedMesh,
    pub chambers: Vec<Chamber>,
    pub settings: SceneSettings,
    pub lights: LightRig,
    pub room: Option<RoomAsset>,
    /// Seconds of animation applied so far.
    pub elapsed: f64,
}

impl PortalScene {
    /// Bind one face record to every face group of `geometry`.
    ///
    /// Fails when the face records and the geometry's groups disagree on the
    /// set of face identifiers, or when the groups or normals do not cover
    /// the geometry's buffers.
    pub fn assemble(
        geometry: IndexedMesh,
        faces: Vec<FacePortal>,
        mut settings: SceneSettings,
        room: Option<RoomAsset>,
    ) -> Result<Self> {
        if faces.len() != geometry.groups.len() {
            return Err(PortalError::Scene(format!(
                "{} face records for {} face groups",
                faces.len(),
                geometry.groups.len()
            )));
        }

        if !geometry.groups_partition_indices() {
            return Err(PortalError::Scene(format!(
                "Face groups do not tile the {} index entries",
                geometry.index_count()
            )));
        }
        if geometry.has_normals() && geometry.normals.len() != geometry.positions.len() {
            return Err(PortalError::Scene(format!(
                "{} normal components for {} vertices",
                geometry.normals.len(),
                geometry.vertex_count()
            )));
        }
        if geometry.is_indexed()
            && geometry
                .indices
                .iter()
                .any(|&i| i as usize >= geometry.vertex_count())
        {
            return Err(PortalError::Scene(
                "Index buffer references missing vertices".into(),
            ));
        }

        if !settings.room_scale.is_finite() || settings.room_scale <= 0.0 {
            warn!(
                room_scale = settings.room_scale,
                fallback = FALLBACK_ROOM_SCALE,
                "Invalid room scale, using fallback"
            );
            settings.room_scale = FALLBACK_ROOM_SCALE;
        }

        let mut claimed = BTreeSet::new();
        let mut chambers = Vec::with_capacity(faces.len());
        for portal in faces {
            if !claimed.insert(portal.face) {
                return Err(PortalError::Scene(format!(
                    "Face {} appears more than once",
                    portal.face
                )));
            }
            let group = *geometry.group_for_face(portal.face).ok_or_else(|| {
                PortalError::Scene(format!("No face group for face {}", portal.face))
            })?;
            let normal = face_normal(&geometry, &group);

            debug!(
                face = portal.face,
                background = %portal.background,
                shape = portal.shape.name(),
                "Chamber"
            );

            chambers.push(Chamber {
                portal,
                group,
                normal,
                spin: Spin::default(),
            });
        }

        info!(
            chambers = chambers.len(),
            room = room.is_some(),
            "Assembled portal scene"
        );

        Ok(PortalScene {
            geometry,
            chambers,
            settings,
            lights: LightRig::default(),
            room,
            elapsed: 0.0,
        })
    }

    /// One material per face, in face-identifier order.
    pub fn portal_materials(&self) -> Vec<PortalMaterial> {
        self.chambers
            .iter()
            .map(|c| PortalMaterial::new(c.portal.face, c.portal.background))
            .collect()
    }

    /// Advance every inner shape by one frame of `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        for chamber in &mut self.chambers {
            chamber.spin.advance(delta);
        }
        self.elapsed += delta;
    }
}

/// Mean vertex normal over a group, normalized.
fn face_normal(mesh: &IndexedMesh, group: &FaceGroup) -> [f32; 3] {
    if !mesh.has_normals() {
        return [0.0; 3];
    }

    let sum = group
        .range()
        .filter_map(|i| {
            let v = mesh.vertex_at(i) as usize * 3;
            mesh.normals.get(v..v + 3).map(glam::Vec3::from_slice)
        })
        .fold(glam::Vec3::ZERO, |acc, n| acc + n);

    sum.normalize_or_zero().to_array()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::build_indexed_dodecahedron;

    fn scene() -> PortalScene {
        let geometry = build_indexed_dodecahedron(3.0, 0).unwrap();
        PortalScene::assemble(
            geometry,
            default_faces().unwrap(),
            SceneSettings::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn one_chamber_per_group() {
        let scene = scene();
        assert_eq!(scene.chambers.len(), 12);
        for (i, chamber) in scene.chambers.iter().enumerate() {
            assert_eq!(chamber.portal.face, i);
            assert_eq!(chamber.group.face, i);
            assert_eq!(chamber.group.start, i * 9);
        }
    }

    #[test]
    fn materials_match_group_faces() {
        let scene = scene();
        let materials = scene.portal_materials();
        assert_eq!(materials.len(), 12);
        for (group, material) in scene.geometry.groups.iter().zip(&materials) {
            assert_eq!(group.face, material.face);
        }
        assert_eq!(materials[6].background.to_hex(), "#ffd700");
    }

    #[test]
    fn face_normals_are_unit_and_distinct() {
        let scene = scene();
        for chamber in &scene.chambers {
            let n = glam::Vec3::from_array(chamber.normal);
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
        }

        // Opposite faces of a dodecahedron come in antiparallel pairs.
        let antiparallel = scene
            .chambers
            .iter()
            .flat_map(|a| scene.chambers.iter().map(move |b| (a, b)))
            .filter(|(a, b)| {
                glam::Vec3::from_array(a.normal).dot(glam::Vec3::from_array(b.normal)) < -0.999
            })
            .count();
        assert_eq!(antiparallel, 12);
    }

    #[test]
    fn advance_spins_every_chamber() {
        let mut scene = scene();
        scene.advance(0.5);
        scene.advance(0.25);

        assert_relative_eq!(scene.elapsed, 0.75);
        for chamber in &scene.chambers {
            assert_relative_eq!(chamber.spin.y, 0.75);
            assert_eq!(chamber.spin.x, chamber.spin.y);
        }
    }

    #[test]
    fn mismatched_face_count_is_rejected() {
        let geometry = build_indexed_dodecahedron(3.0, 0).unwrap();
        let mut faces = default_faces().unwrap();
        faces.pop();

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(err.to_string().contains("11 face records"));
    }

    #[test]
    fn unknown_face_identifier_is_rejected() {
        let geometry = build_indexed_dodecahedron(3.0, 0).unwrap();
        let mut faces = default_faces().unwrap();
        faces[3].face = 40;

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(err.to_string().contains("face 40"));
    }

    #[test]
    fn duplicate_face_identifier_is_rejected() {
        let geometry = build_indexed_dodecahedron(3.0, 0).unwrap();
        let mut faces = default_faces().unwrap();
        faces[1].face = 0;

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(matches!(err, PortalError::Scene(_)));
        assert!(err.to_string().contains("Face 0 appears more than once"));
    }

    #[test]
    fn overrunning_group_is_rejected() {
        let mut geometry = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            ..Default::default()
        };
        geometry.add_group(0, 6, 0);
        let faces = default_faces().unwrap().into_iter().take(1).collect();

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(err.to_string().contains("do not tile"));
    }

    #[test]
    fn short_normal_buffer_is_rejected() {
        let mut geometry = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0],
            ..Default::default()
        };
        geometry.add_group(0, 3, 0);
        let faces = default_faces().unwrap().into_iter().take(1).collect();

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(err.to_string().contains("normal components"));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut geometry = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 7],
            ..Default::default()
        };
        geometry.add_group(0, 3, 0);
        let faces = default_faces().unwrap().into_iter().take(1).collect();

        let err =
            PortalScene::assemble(geometry, faces, SceneSettings::default(), None).unwrap_err();
        assert!(err.to_string().contains("missing vertices"));
    }

    #[test]
    fn bad_room_scale_falls_back() {
        let geometry = build_indexed_dodecahedron(3.0, 0).unwrap();
        let settings = SceneSettings {
            room_scale: -1.0,
            ..Default::default()
        };
        let scene =
            PortalScene::assemble(geometry, default_faces().unwrap(), settings, None).unwrap();
        assert_eq!(scene.settings.room_scale, FALLBACK_ROOM_SCALE);
    }

    #[test]
    fn chambers_keep_face_table_shapes() {
        let scene = scene();
        assert_eq!(scene.chambers[10].portal.shape, InnerShape::Empty);
        assert_eq!(scene.chambers[0].portal.shape.name(), "torus");
    }
}
