use std::borrow::Cow;
use std::collections::BTreeMap;

use gltf::binary::Glb;
use gltf_json::accessor::{ComponentType, GenericComponentType, Type as AccessorType};
use gltf_json::buffer::Target;
use gltf_json::mesh::{Mode, Primitive, Semantic};
use gltf_json::validation::{Checked, USize64};
use gltf_json::Index;

use crate::error::{PortalError, Result};
use crate::types::{BoundingBox, IndexedMesh, PortalMaterial};

const GENERATOR: &str = "portal-dodeca";

/// Serialize a grouped mesh into a binary GLB (glTF 2.0) byte buffer.
///
/// Produces a self-contained GLB with:
/// - 1 buffer (positions + optional normals/UVs + one index run per group)
/// - shared attribute accessors
/// - 1 Mesh with one Primitive per face group, each bound to the material
///   whose `face` matches the group
/// - 1 Node scaled by `scale` → 1 Scene
///
/// Non-indexed meshes get sequential indices synthesized. A mesh without
/// groups is written as a single primitive with no material.
pub fn write_portal_glb(
    mesh: &IndexedMesh,
    materials: &[PortalMaterial],
    scale: f32,
) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return write_empty_glb();
    }

    let mut root = gltf_json::Root {
        asset: gltf_json::Asset {
            version: "2.0".into(),
            generator: Some(GENERATOR.into()),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bin_data: Vec<u8> = Vec::new();
    let mut attributes = BTreeMap::new();
    let buffer_idx = Index::new(0); // pushed at the end

    // --- Positions (required) ---
    let (pos_min, pos_max) = BoundingBox::from_positions(&mesh.positions)
        .map(|bb| bb.to_f32())
        .unwrap_or(([0.0; 3], [0.0; 3]));
    let pos_view = write_vertex_attribute_view(
        &mut root,
        &mut bin_data,
        buffer_idx,
        bytemuck::cast_slice(&mesh.positions),
    );
    let pos_accessor = push_accessor(
        &mut root,
        pos_view,
        mesh.vertex_count(),
        ComponentType::F32,
        AccessorType::Vec3,
        Some((serde_json::json!(pos_min), serde_json::json!(pos_max))),
    );
    attributes.insert(Checked::Valid(Semantic::Positions), pos_accessor);

    // --- Normals (optional) ---
    if mesh.has_normals() {
        let view = write_vertex_attribute_view(
            &mut root,
            &mut bin_data,
            buffer_idx,
            bytemuck::cast_slice(&mesh.normals),
        );
        let accessor = push_accessor(
            &mut root,
            view,
            mesh.vertex_count(),
            ComponentType::F32,
            AccessorType::Vec3,
            None,
        );
        attributes.insert(Checked::Valid(Semantic::Normals), accessor);
    }

    // --- UVs (optional) ---
    if mesh.has_uvs() {
        let view = write_vertex_attribute_view(
            &mut root,
            &mut bin_data,
            buffer_idx,
            bytemuck::cast_slice(&mesh.uvs),
        );
        let accessor = push_accessor(
            &mut root,
            view,
            mesh.vertex_count(),
            ComponentType::F32,
            AccessorType::Vec2,
            None,
        );
        attributes.insert(Checked::Valid(Semantic::TexCoords(0)), accessor);
    }

    // --- Materials, one per face ---
    let material_indices: BTreeMap<usize, Index<gltf_json::Material>> = materials
        .iter()
        .map(|mat| (mat.face, build_material(&mut root, mat)))
        .collect();

    // --- Indices + primitives (one per group) ---
    let indices = mesh.resolved_indices();
    let use_u16_indices = mesh.vertex_count() <= 65535;
    let idx_component_type = if use_u16_indices {
        ComponentType::U16
    } else {
        ComponentType::U32
    };

    let runs: Vec<(std::ops::Range<usize>, Option<usize>)> = if mesh.groups.is_empty() {
        vec![(0..indices.len(), None)]
    } else {
        mesh.groups.iter().map(|g| (g.range(), Some(g.face))).collect()
    };

    let mut primitives = Vec::with_capacity(runs.len());
    for (range, face) in runs {
        let run = indices.get(range.clone()).ok_or_else(|| {
            PortalError::Output(format!(
                "Group range {range:?} exceeds {} indices",
                indices.len()
            ))
        })?;

        let idx_view = write_index_view(&mut root, &mut bin_data, buffer_idx, run, use_u16_indices);
        let idx_accessor = push_accessor(
            &mut root,
            idx_view,
            run.len(),
            idx_component_type,
            AccessorType::Scalar,
            None,
        );

        primitives.push(Primitive {
            attributes: attributes.clone(),
            indices: Some(idx_accessor),
            material: face.and_then(|f| material_indices.get(&f).copied()),
            mode: Checked::Valid(Mode::Triangles),
            targets: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
    }

    // --- Mesh ---
    let mesh_idx = root.push(gltf_json::Mesh {
        primitives,
        weights: None,
        name: Some("portal".into()),
        extensions: Default::default(),
        extras: Default::default(),
    });

    // --- Node ---
    let node_idx = root.push(gltf_json::Node {
        mesh: Some(mesh_idx),
        scale: Some([scale, scale, scale]),
        ..Default::default()
    });

    // --- Scene ---
    let scene_idx = root.push(gltf_json::Scene {
        nodes: vec![node_idx],
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene_idx);

    // --- Buffer (the one buffer holding all data) ---
    pad_to_four(&mut bin_data, 0);
    root.push(gltf_json::Buffer {
        byte_length: USize64::from(bin_data.len()),
        uri: None,
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });

    assemble_glb(&root, Some(bin_data))
}

fn push_accessor(
    root: &mut gltf_json::Root,
    view: Index<gltf_json::buffer::View>,
    count: usize,
    component_type: ComponentType,
    type_: AccessorType,
    bounds: Option<(serde_json::Value, serde_json::Value)>,
) -> Index<gltf_json::Accessor> {
    let (min, max) = match bounds {
        Some((min, max)) => (Some(min), Some(max)),
        None => (None, None),
    };

    root.push(gltf_json::Accessor {
        buffer_view: Some(view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(count),
        component_type: Checked::Valid(GenericComponentType(component_type)),
        type_: Checked::Valid(type_),
        min,
        max,
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    })
}

fn pad_to_four(data: &mut Vec<u8>, fill: u8) {
    while data.len() % 4 != 0 {
        data.push(fill);
    }
}

/// Append a vertex attribute buffer view.
fn write_vertex_attribute_view(
    root: &mut gltf_json::Root,
    bin_data: &mut Vec<u8>,
    buffer_idx: Index<gltf_json::Buffer>,
    raw_bytes: &[u8],
) -> Index<gltf_json::buffer::View> {
    pad_to_four(bin_data, 0);
    let byte_offset = bin_data.len();
    bin_data.extend_from_slice(raw_bytes);

    root.push(gltf_json::buffer::View {
        buffer: buffer_idx,
        byte_length: USize64::from(raw_bytes.len()),
        byte_offset: Some(USize64::from(byte_offset)),
        byte_stride: None,
        name: None,
        target: Some(Checked::Valid(Target::ArrayBuffer)),
        extensions: Default::default(),
        extras: Default::default(),
    })
}

/// Append an index buffer view.
fn write_index_view(
    root: &mut gltf_json::Root,
    bin_data: &mut Vec<u8>,
    buffer_idx: Index<gltf_json::Buffer>,
    indices: &[u32],
    use_u16: bool,
) -> Index<gltf_json::buffer::View> {
    pad_to_four(bin_data, 0);
    let byte_offset = bin_data.len();

    if use_u16 {
        let idx_u16: Vec<u16> = indices.iter().map(|&i| i as u16).collect();
        bin_data.extend_from_slice(bytemuck::cast_slice(&idx_u16));
    } else {
        bin_data.extend_from_slice(bytemuck::cast_slice(indices));
    }
    let byte_length = bin_data.len() - byte_offset;

    root.push(gltf_json::buffer::View {
        buffer: buffer_idx,
        byte_length: USize64::from(byte_length),
        byte_offset: Some(USize64::from(byte_offset)),
        byte_stride: None,
        name: None,
        target: Some(Checked::Valid(Target::ElementArrayBuffer)),
        extensions: Default::default(),
        extras: Default::default(),
    })
}

/// Opaque PBR material carrying the face background.
fn build_material(root: &mut gltf_json::Root, mat: &PortalMaterial) -> Index<gltf_json::Material> {
    let pbr = gltf_json::material::PbrMetallicRoughness {
        base_color_factor: gltf_json::material::PbrBaseColorFactor(mat.base_color()),
        metallic_factor: gltf_json::material::StrengthFactor(mat.metallic),
        roughness_factor: gltf_json::material::StrengthFactor(mat.roughness),
        base_color_texture: None,
        metallic_roughness_texture: None,
        extensions: Default::default(),
        extras: Default::default(),
    };

    root.push(gltf_json::Material {
        pbr_metallic_roughness: pbr,
        alpha_mode: Checked::Valid(gltf_json::material::AlphaMode::Opaque),
        alpha_cutoff: None,
        double_sided: false,
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: gltf_json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        name: Some(mat.name.clone()),
        extensions: Default::default(),
        extras: Default::default(),
    })
}

/// Produce a minimal valid empty GLB.
fn write_empty_glb() -> Result<Vec<u8>> {
    let mut root = gltf_json::Root {
        asset: gltf_json::Asset {
            version: "2.0".into(),
            generator: Some(GENERATOR.into()),
            ..Default::default()
        },
        ..Default::default()
    };

    let node_idx = root.push(gltf_json::Node::default());
    let scene_idx = root.push(gltf_json::Scene {
        nodes: vec![node_idx],
        name: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene_idx);

    assemble_glb(&root, None)
}

/// Wrap the JSON document and binary chunk in a GLB container.
fn assemble_glb(root: &gltf_json::Root, bin: Option<Vec<u8>>) -> Result<Vec<u8>> {
    let json_string = gltf_json::serialize::to_string(root)
        .map_err(|e| PortalError::Output(format!("Failed to serialize glTF JSON: {e}")))?;
    let mut json_bytes = json_string.into_bytes();
    // JSON chunk is padded with spaces
    pad_to_four(&mut json_bytes, b' ');

    let bin_len = bin.as_ref().map(|b| 8 + b.len()).unwrap_or(0);
    let glb = Glb {
        header: gltf::binary::Header {
            magic: *b"glTF",
            version: 2,
            length: (12 + 8 + json_bytes.len() + bin_len) as u32,
        },
        json: Cow::Owned(json_bytes),
        bin: bin.map(Cow::Owned),
    };

    glb.to_vec()
        .map_err(|e| PortalError::Output(format!("Failed to assemble GLB: {e}")))
}
